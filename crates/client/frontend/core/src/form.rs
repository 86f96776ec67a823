//! Entry form state.
//!
//! The form holds exactly what the user typed. Nothing is trimmed or parsed
//! here; [`EntryForm::to_draft`] hands the raw values to validation.
use leaderboard_core::{Category, EntryDraft, InputMode, LapTimeInput};

/// Category selection a fresh form starts with.
pub const DEFAULT_CATEGORY: &str = "staff";

/// Editable field of the entry form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FormField {
    Name,
    Company,
    #[strum(to_string = "lap_time", serialize = "laptime", serialize = "time")]
    LapTime,
    #[strum(to_string = "minutes", serialize = "min")]
    Minutes,
    #[strum(to_string = "seconds", serialize = "sec")]
    Seconds,
    #[strum(to_string = "milliseconds", serialize = "ms")]
    Milliseconds,
    Date,
    Category,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryForm {
    pub name: String,
    pub company: String,
    /// Free-text lap time.
    pub lap_time: String,
    pub minutes: String,
    pub seconds: String,
    pub milliseconds: String,
    pub date: String,
    /// Raw category selection; see [`Category::from_selection`].
    pub category: String,
    pub mode: InputMode,
    open: bool,
}

impl EntryForm {
    pub fn new(mode: InputMode) -> Self {
        Self {
            name: String::new(),
            company: String::new(),
            lap_time: String::new(),
            minutes: String::new(),
            seconds: String::new(),
            milliseconds: String::new(),
            date: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            mode,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the form. Values typed earlier are kept.
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Clear every value and select the default category.
    ///
    /// The input mode and the open flag are left alone.
    pub fn reset(&mut self) {
        *self = Self {
            open: self.open,
            ..Self::new(self.mode)
        };
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Company => self.company = value,
            FormField::LapTime => self.lap_time = value,
            FormField::Minutes => self.minutes = value,
            FormField::Seconds => self.seconds = value,
            FormField::Milliseconds => self.milliseconds = value,
            FormField::Date => self.date = value,
            FormField::Category => self.category = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Company => &self.company,
            FormField::LapTime => &self.lap_time,
            FormField::Minutes => &self.minutes,
            FormField::Seconds => &self.seconds,
            FormField::Milliseconds => &self.milliseconds,
            FormField::Date => &self.date,
            FormField::Category => &self.category,
        }
    }

    /// Fields shown for the current input mode, in form order.
    pub fn visible_fields(&self) -> &'static [FormField] {
        match self.mode {
            InputMode::Structured => &[
                FormField::Name,
                FormField::Company,
                FormField::Minutes,
                FormField::Seconds,
                FormField::Milliseconds,
                FormField::Date,
                FormField::Category,
            ],
            InputMode::FreeText => &[
                FormField::Name,
                FormField::Company,
                FormField::LapTime,
                FormField::Date,
                FormField::Category,
            ],
        }
    }

    pub fn category(&self) -> Category {
        Category::from_selection(&self.category)
    }

    /// Draft for the current mode; values of the other mode are ignored.
    pub fn to_draft(&self) -> EntryDraft {
        let lap_time = match self.mode {
            InputMode::Structured => LapTimeInput::Structured {
                minutes: self.minutes.clone(),
                seconds: self.seconds.clone(),
                milliseconds: self.milliseconds.clone(),
            },
            InputMode::FreeText => LapTimeInput::FreeText(self.lap_time.clone()),
        };

        EntryDraft {
            name: self.name.clone(),
            company: self.company.clone(),
            lap_time,
            date: self.date.clone(),
            category: self.category(),
        }
    }
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new(InputMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_selects_staff() {
        let form = EntryForm::default();
        assert_eq!(form.category, "staff");
        assert_eq!(form.category(), Category::Staff);
        assert!(!form.is_open());
    }

    #[test]
    fn unknown_selection_routes_to_clients() {
        let mut form = EntryForm::default();
        form.set(FormField::Category, "suppliers");
        assert_eq!(form.category(), Category::Clients);

        form.set(FormField::Category, "");
        assert_eq!(form.category(), Category::Clients);
    }

    #[test]
    fn draft_uses_active_mode_only() {
        let mut form = EntryForm::new(InputMode::FreeText);
        form.set(FormField::LapTime, "1:02.003");
        form.set(FormField::Minutes, "9");

        assert_eq!(
            form.to_draft().lap_time,
            LapTimeInput::FreeText("1:02.003".into())
        );

        form.mode = InputMode::Structured;
        assert_eq!(
            form.to_draft().lap_time,
            LapTimeInput::Structured {
                minutes: "9".into(),
                seconds: String::new(),
                milliseconds: String::new(),
            }
        );
    }

    #[test]
    fn reset_keeps_mode_and_visibility() {
        let mut form = EntryForm::new(InputMode::FreeText);
        form.open();
        form.set(FormField::Name, "A. Driver");
        form.set(FormField::Category, "clients");

        form.reset();

        assert_eq!(form.name, "");
        assert_eq!(form.category, "staff");
        assert_eq!(form.mode, InputMode::FreeText);
        assert!(form.is_open());
    }

    #[test]
    fn field_names_parse_with_aliases() {
        assert_eq!("ms".parse::<FormField>(), Ok(FormField::Milliseconds));
        assert_eq!("Lap_Time".parse::<FormField>(), Ok(FormField::LapTime));
        assert_eq!("company".parse::<FormField>(), Ok(FormField::Company));
        assert!("team".parse::<FormField>().is_err());
        assert_eq!(FormField::LapTime.to_string(), "lap_time");
    }

    #[test]
    fn values_are_kept_verbatim() {
        let mut form = EntryForm::default();
        form.set(FormField::Name, "  spaced  ");
        assert_eq!(form.get(FormField::Name), "  spaced  ");
        assert_eq!(form.to_draft().name, "  spaced  ");
    }
}
