//! Todo entity.

/// A single todo record.
///
/// `id` is assigned by the store at creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Mutable fields of a todo.
///
/// Used for both creation and full replacement; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl Todo {
    /// Builds a stored todo from its identifier and fields.
    pub fn from_fields(id: i64, fields: TodoFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            completed: fields.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_keeps_values() {
        let todo = Todo::from_fields(
            7,
            TodoFields {
                title: "buy milk".to_string(),
                description: "2%".to_string(),
                completed: false,
            },
        );

        assert_eq!(todo.id, 7);
        assert_eq!(todo.title, "buy milk");
        assert_eq!(todo.description, "2%");
        assert!(!todo.completed);
    }
}
