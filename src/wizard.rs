//! Campaign Wizard State Machine
//!
//! Three linear steps advanced only by an explicit Next that passes
//! step-local validation. Back navigation never loses entered data because
//! the form lives outside the step pointer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Audience,
    Message,
    Launch,
}

impl WizardStep {
    pub fn next(self) -> Self {
        match self {
            WizardStep::Audience => WizardStep::Message,
            WizardStep::Message | WizardStep::Launch => WizardStep::Launch,
        }
    }

    pub fn back(self) -> Self {
        match self {
            WizardStep::Audience | WizardStep::Message => WizardStep::Audience,
            WizardStep::Launch => WizardStep::Message,
        }
    }

    /// 1-based position for the "Step n of 3" header.
    pub fn position(self) -> usize {
        match self {
            WizardStep::Audience => 1,
            WizardStep::Message => 2,
            WizardStep::Launch => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Contacts,
    Sheet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardForm {
    pub name: String,
    pub source: SourceType,
    pub sheet_url: String,
    pub sheet_valid: bool,
    pub contact_count: u32,
}

impl Default for WizardForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            source: SourceType::Sheet,
            sheet_url: String::new(),
            sheet_valid: false,
            contact_count: 0,
        }
    }
}

/// Step-local validation. A sheet-sourced audience may not advance (and so
/// can never launch) until the sheet URL passed a validate call.
pub fn can_advance(step: WizardStep, form: &WizardForm) -> Result<(), &'static str> {
    if step != WizardStep::Audience {
        return Ok(());
    }
    if form.name.trim().is_empty() {
        return Err("Please enter a campaign name");
    }
    if form.source == SourceType::Sheet && !form.sheet_valid {
        return Err("Please validate your Google Sheet URL first");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> WizardForm {
        WizardForm {
            name: "Diwali Sale Blast".into(),
            source: SourceType::Sheet,
            sheet_url: "https://docs.google.com/spreadsheets/d/abc".into(),
            sheet_valid: true,
            contact_count: 42,
        }
    }

    #[test]
    fn steps_advance_linearly_and_saturate() {
        assert_eq!(WizardStep::Audience.next(), WizardStep::Message);
        assert_eq!(WizardStep::Message.next(), WizardStep::Launch);
        assert_eq!(WizardStep::Launch.next(), WizardStep::Launch);
        assert_eq!(WizardStep::Launch.back(), WizardStep::Message);
        assert_eq!(WizardStep::Audience.back(), WizardStep::Audience);
    }

    #[test]
    fn audience_requires_name() {
        let mut form = valid_form();
        form.name = "  ".into();
        assert!(can_advance(WizardStep::Audience, &form).is_err());
    }

    #[test]
    fn unvalidated_sheet_blocks_advance() {
        let mut form = valid_form();
        form.sheet_valid = false;
        assert!(can_advance(WizardStep::Audience, &form).is_err());

        form.sheet_valid = true;
        assert!(can_advance(WizardStep::Audience, &form).is_ok());
    }

    #[test]
    fn contacts_source_needs_no_sheet_validation() {
        let mut form = valid_form();
        form.source = SourceType::Contacts;
        form.sheet_valid = false;
        assert!(can_advance(WizardStep::Audience, &form).is_ok());
    }

    #[test]
    fn later_steps_always_advance() {
        let form = WizardForm::default();
        assert!(can_advance(WizardStep::Message, &form).is_ok());
        assert!(can_advance(WizardStep::Launch, &form).is_ok());
    }

    #[test]
    fn back_navigation_preserves_form() {
        // The form is owned outside the step pointer; stepping back and
        // forth must leave it untouched.
        let form = valid_form();
        let step = WizardStep::Audience.next().back();
        assert_eq!(step, WizardStep::Audience);
        assert_eq!(form, valid_form());
    }
}
