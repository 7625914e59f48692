use serde::{Deserialize, Serialize};

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub program: String,
    pub campus: String,
    pub prev_school: String,
    pub grade: String,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            program: String::new(),
            campus: "Bahawalpur".into(),
            prev_school: String::new(),
            grade: String::new(),
        }
    }
}

/// Four-step undergraduate application wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionsWizard {
    step: u8,
    pub form: ApplicationForm,
}

impl Default for AdmissionsWizard {
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            form: ApplicationForm::default(),
        }
    }
}

impl AdmissionsWizard {
    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn step_title(&self) -> &'static str {
        match self.step {
            1 => "Personal Information",
            2 => "Academic History",
            3 => "Program Selection",
            _ => "Application Ready!",
        }
    }

    pub fn next(&mut self) -> u8 {
        self.step = (self.step + 1).min(LAST_STEP);
        self.step
    }

    pub fn prev(&mut self) -> u8 {
        self.step = self.step.saturating_sub(1).max(FIRST_STEP);
        self.step
    }

    pub fn can_go_back(&self) -> bool {
        self.step > FIRST_STEP
    }

    pub fn is_complete(&self) -> bool {
        self.step == LAST_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_step_with_default_campus() {
        let wizard = AdmissionsWizard::default();
        assert_eq!(wizard.step(), 1);
        assert!(!wizard.can_go_back());
        assert_eq!(wizard.form.campus, "Bahawalpur");
        assert_eq!(wizard.step_title(), "Personal Information");
    }

    #[test]
    fn steps_clamp_at_both_ends() {
        let mut wizard = AdmissionsWizard::default();
        assert_eq!(wizard.prev(), 1);
        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.step(), 4);
        assert!(wizard.is_complete());
        assert_eq!(wizard.step_title(), "Application Ready!");
        assert_eq!(wizard.prev(), 3);
    }

    #[test]
    fn form_serializes_with_site_field_names() {
        let form = ApplicationForm {
            prev_school: "Sadiq Public School".into(),
            ..ApplicationForm::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["prevSchool"], "Sadiq Public School");
        assert_eq!(value["campus"], "Bahawalpur");
    }
}
