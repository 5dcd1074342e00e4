//! Relation types: the ordered column sets operators produce and consume

use crate::types::{DataType, SemanticType, ValueType};
use serde::{Deserialize, Serialize};

/// One named column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub semantic_type: SemanticType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            data_type,
            semantic_type,
        }
    }

    pub fn value_type(&self) -> ValueType {
        ValueType::new(self.data_type, self.semantic_type)
    }
}

/// Ordered, name-unique relation type.
///
/// Columns keep first-insertion order. Adding a name that is already present
/// is a no-op and the first type wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Field>", into = "Vec<Field>")]
pub struct TableType {
    fields: Vec<Field>,
}

impl TableType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and leaves the table untouched) if `name` already exists.
    pub fn add_column(&mut self, name: impl Into<String>, value_type: ValueType) -> bool {
        let name = name.into();
        if self.has_column(&name) {
            return false;
        }
        self.fields.push(Field::new(name, value_type.data_type, value_type.semantic_type));
        true
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.find_field(name).is_some()
    }

    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get(&self, name: &str) -> Option<ValueType> {
        self.find_field(name).map(Field::value_type)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<Field>> for TableType {
    fn from(fields: Vec<Field>) -> Self {
        fields.into_iter().collect()
    }
}

impl From<TableType> for Vec<Field> {
    fn from(table: TableType) -> Self {
        table.fields
    }
}

impl FromIterator<Field> for TableType {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut table = TableType::new();
        for field in iter {
            let value_type = field.value_type();
            table.add_column(field.name, value_type);
        }
        table
    }
}
