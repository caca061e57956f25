//! Per-user hospital and category lists that feed the shift and expense forms.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Hospital,
    Category,
}

impl RegistryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Category => "category",
        }
    }

    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Hospital => "hsp",
            Self::Category => "cat",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hospital" => Some(Self::Hospital),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryItem {
    pub id: String,
    pub kind: RegistryKind,
    pub name: String,
}

/// Case-insensitive name comparison used for duplicates and label matching.
pub fn same_name(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

/// The registered spelling of `label`, if the list carries it.
pub fn registered_spelling<'a>(items: &'a [RegistryItem], label: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|item| same_name(&item.name, label))
        .map(|item| item.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::{RegistryItem, RegistryKind, registered_spelling, same_name};

    fn hospital(name: &str) -> RegistryItem {
        RegistryItem {
            id: format!("hsp_{name}"),
            kind: RegistryKind::Hospital,
            name: name.to_string(),
        }
    }

    #[test]
    fn names_match_ignoring_case_and_padding() {
        assert!(same_name("Hospital São Lucas", "  hospital SÃO lucas "));
        assert!(!same_name("UPA Norte", "UPA Sul"));
    }

    #[test]
    fn registered_spelling_wins_over_typed_label() {
        let items = vec![hospital("Hospital Norte"), hospital("UPA Centro")];
        assert_eq!(
            registered_spelling(&items, "upa centro"),
            Some("UPA Centro")
        );
        assert_eq!(registered_spelling(&items, "Clínica Sul"), None);
    }

    #[test]
    fn kinds_round_trip_through_labels() {
        for kind in [RegistryKind::Hospital, RegistryKind::Category] {
            assert_eq!(RegistryKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RegistryKind::parse("clinic"), None);
    }
}
