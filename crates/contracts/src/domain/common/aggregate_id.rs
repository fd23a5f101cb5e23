use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

/// Строковый идентификатор агрегата.
///
/// REST backend отдаёт ID строками ("1", "WO-1001", uuid), поэтому newtype
/// сериализуется прозрачно как строка.
#[macro_export]
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl $crate::domain::common::AggregateId for $name {
            fn as_string(&self) -> String {
                self.0.clone()
            }

            fn from_string(s: &str) -> Result<Self, String> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(format!("Empty {}", stringify!($name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::string_id!(TestId);

    #[test]
    fn test_string_id_roundtrip() {
        let id = TestId::from_string("  WO-1001 ").unwrap();
        assert_eq!(id.as_str(), "WO-1001");
        assert_eq!(id.as_string(), "WO-1001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"WO-1001\"");
    }

    #[test]
    fn test_string_id_rejects_empty() {
        assert!(TestId::from_string("   ").is_err());
    }
}
