//! Text rendering of boards, the form, and notices.
use console::style;

use client_frontend_core::{BoardView, EntryForm, FormField, MessageEntry, MessageLevel};
use leaderboard_core::InputMode;
use leaderboard_runtime::BoardStatus;

pub const HELP: &str = "\
Commands:
  new [staff|clients]   open the entry form
  mode split|text       lap time as minutes/seconds/ms or as one value
  set <field> <value>   fill a field (name, company, lap_time, minutes,
                        seconds, ms, date, category)
  submit                store the entry
  cancel                hide the form, keeping its values
  form                  show the form
  show [staff|clients]  print the boards
  help                  this text
  quit                  leave";

pub fn board(view: &BoardView) -> String {
    let mut out = format!("{} {}\n", style(view.title).bold(), status(&view.status));

    if view.is_empty() {
        out.push_str(&format!("  {}\n", style("No lap times yet.").dim()));
        return out;
    }

    out.push_str(&format!(
        "  {}\n",
        style(format!(
            "{:>4}  {:<20} {:<20} {:<12} {}",
            "#", "Name", "Company", "Lap time", "Date"
        ))
        .underlined()
    ));

    for row in &view.rows {
        out.push_str(&format!(
            "  {:>4}  {:<20} {:<20} {} {}\n",
            row.rank,
            row.name,
            row.company,
            style(format!("{:<12}", row.lap_time)).cyan(),
            row.date
        ));
    }

    if view.hidden > 0 {
        out.push_str(&format!(
            "  {}\n",
            style(format!("... {} more", view.hidden)).dim()
        ));
    }

    out
}

fn status(status: &BoardStatus) -> String {
    match status {
        BoardStatus::Connecting => style("(connecting)").yellow().to_string(),
        BoardStatus::Live => style("(live)").green().to_string(),
        BoardStatus::Stale { reason } => style(format!("(not updating: {reason})"))
            .yellow()
            .to_string(),
        BoardStatus::Closed => style("(closed)").dim().to_string(),
    }
}

pub fn form(form: &EntryForm) -> String {
    let mode = match form.mode {
        InputMode::Structured => "minutes / seconds / ms",
        InputMode::FreeText => "single value",
    };
    let mut out = format!(
        "{} {}\n",
        style("New lap time").bold(),
        style(format!("[lap time: {mode}]")).dim()
    );

    for &field in form.visible_fields() {
        let value = form.get(field);
        let shown = if value.is_empty() {
            style("-".to_string()).dim()
        } else {
            style(value.to_string())
        };
        out.push_str(&format!("  {:<14} {}\n", label(field), shown));
    }

    if !form.is_open() {
        out.push_str(&format!("  {}\n", style("(closed; `new` to reopen)").dim()));
    }

    out
}

fn label(field: FormField) -> &'static str {
    match field {
        FormField::Name => "name",
        FormField::Company => "company",
        FormField::LapTime => "lap_time",
        FormField::Minutes => "minutes",
        FormField::Seconds => "seconds",
        FormField::Milliseconds => "ms",
        FormField::Date => "date",
        FormField::Category => "category",
    }
}

pub fn message(entry: &MessageEntry) -> String {
    match entry.level {
        MessageLevel::Info => style(&entry.text).green().to_string(),
        MessageLevel::Warning => style(&entry.text).yellow().to_string(),
        MessageLevel::Error => style(&entry.text).red().bold().to_string(),
    }
}
