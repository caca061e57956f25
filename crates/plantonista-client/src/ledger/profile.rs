/// Identification printed on statements: name, medical specialty and CRM
/// registration number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub specialty: String,
    pub crm: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub specialty: Option<String>,
    pub crm: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.specialty.is_none() && self.crm.is_none()
    }
}

impl Profile {
    /// Applies the given fields; an empty value clears the field.
    pub fn apply(mut self, changes: &ProfileChanges) -> Self {
        if let Some(value) = changes.full_name.as_deref() {
            self.full_name = value.trim().to_string();
        }
        if let Some(value) = changes.specialty.as_deref() {
            self.specialty = value.trim().to_string();
        }
        if let Some(value) = changes.crm.as_deref() {
            self.crm = value.trim().to_string();
        }
        self
    }

    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty() && !self.specialty.is_empty() && !self.crm.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Profile, ProfileChanges};

    #[test]
    fn apply_keeps_untouched_fields() {
        let profile = Profile {
            full_name: "Ana Souza".to_string(),
            specialty: "Clínica médica".to_string(),
            crm: "CRM-SP 123456".to_string(),
        };
        let updated = profile.clone().apply(&ProfileChanges {
            specialty: Some("  Pediatria ".to_string()),
            ..ProfileChanges::default()
        });

        assert_eq!(updated.full_name, profile.full_name);
        assert_eq!(updated.specialty, "Pediatria");
        assert!(updated.is_complete());
    }

    #[test]
    fn empty_value_clears_a_field() {
        let profile = Profile {
            full_name: "Ana Souza".to_string(),
            specialty: String::new(),
            crm: "CRM-SP 123456".to_string(),
        }
        .apply(&ProfileChanges {
            crm: Some(String::new()),
            ..ProfileChanges::default()
        });

        assert_eq!(profile.crm, "");
        assert!(!profile.is_complete());
        assert!(ProfileChanges::default().is_empty());
    }
}
