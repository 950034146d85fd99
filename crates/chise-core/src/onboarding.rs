//! Brand onboarding: the menu templates step.
//!
//! Each field takes one uploaded document plus free-form notes. Fields are a
//! closed set, so state lives in a fixed array indexed by [`MenuField`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ValidationError;

/// Fields of the menu templates form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuField {
    MenuList,
    IngredientInfo,
    CustomizationRules,
    SeasonalItems,
    PrintableTemplates,
}

impl MenuField {
    pub const ALL: [Self; 5] = [
        Self::MenuList,
        Self::IngredientInfo,
        Self::CustomizationRules,
        Self::SeasonalItems,
        Self::PrintableTemplates,
    ];

    /// Form key used in the submitted payload.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::MenuList => "menuList",
            Self::IngredientInfo => "ingredientInfo",
            Self::CustomizationRules => "customizationRules",
            Self::SeasonalItems => "seasonalItems",
            Self::PrintableTemplates => "printableTemplates",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MenuList => "MENU LIST",
            Self::IngredientInfo => "INGREDIENT / ALLERGEN INFO",
            Self::CustomizationRules => "CUSTOMIZATION RULES",
            Self::SeasonalItems => "SEASONAL / SIGNATURE ITEMS",
            Self::PrintableTemplates => "PRINTABLE / EDITABLE TEMPLATES",
        }
    }

    /// Hint shown under the label.
    #[must_use]
    pub const fn note(self) -> &'static str {
        match self {
            Self::MenuList => "Item names, descriptions, and prices (PDF or spreadsheet).",
            Self::IngredientInfo => "Ingredient lists, allergen disclosures, or sourcing details.",
            Self::CustomizationRules => {
                "Specify restrictions like 'can't change bean origin or base ingredients'."
            }
            Self::SeasonalItems => "Highlight limited-time or core menu items for operators.",
            Self::PrintableTemplates => "PDF, Canva, or Figma menu layouts for branding.",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MenuField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for MenuField {
    type Err = ValidationError;

    /// Accepts the camelCase form key or its kebab-case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| {
                field.key() == s || field.key().to_ascii_lowercase() == s.replace('-', "")
            })
            .ok_or_else(|| ValidationError::UnknownMenuField {
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FieldState {
    file_name: Option<String>,
    notes: String,
}

/// Values entered on the menu templates form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuForm {
    fields: [FieldState; MenuField::ALL.len()],
}

impl MenuForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the file picked for `field` (the first of a multi-select),
    /// replacing any earlier one.
    pub fn set_file(&mut self, field: MenuField, file_name: impl Into<String>) {
        self.fields[field.index()].file_name = Some(file_name.into());
    }

    pub fn set_notes(&mut self, field: MenuField, notes: impl Into<String>) {
        self.fields[field.index()].notes = notes.into();
    }

    pub fn file(&self, field: MenuField) -> Option<&str> {
        self.fields[field.index()].file_name.as_deref()
    }

    pub fn notes(&self, field: MenuField) -> &str {
        &self.fields[field.index()].notes
    }

    /// Submission payload: `<key>` holds the file name, `<key>Notes` the
    /// notes. Every key is present; unset values are empty strings. Keys come
    /// out sorted.
    pub fn to_json(&self) -> Value {
        let mut payload = Map::new();
        for field in MenuField::ALL {
            let state = &self.fields[field.index()];
            let file_name = state.file_name.as_deref().unwrap_or_default();
            payload.insert(field.key().to_string(), Value::from(file_name));
            payload.insert(format!("{}Notes", field.key()), Value::from(state.notes.as_str()));
        }
        Value::Object(payload)
    }
}
