//! Func-key templates
//!
//! A template is an ordered set of key mappings shared by the devices it
//! is assigned to. Private templates hold the personal keys of a single
//! user on top of the shared layout.

use serde::{Deserialize, Serialize};

use pbx_kernel::FuncKeyTemplateId;

use crate::destination::FuncKeyDestination;
use crate::error::FuncKeyError;

/// One key mapping inside a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncKeyMapping {
    /// 1-based key position on the device
    pub position: u16,
    /// Label printed next to the key, when the device supports it
    pub label: Option<String>,
    /// Light the BLF lamp for this key
    pub blf: bool,
    pub destination: FuncKeyDestination,
}

impl FuncKeyMapping {
    pub fn new(position: u16, destination: FuncKeyDestination) -> Self {
        Self {
            position,
            label: None,
            blf: destination.is_supervisable(),
            destination,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A func-key template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncKeyTemplate {
    pub id: FuncKeyTemplateId,
    pub name: String,
    /// Private templates belong to one user and are not listed
    pub private: bool,
    pub keys: Vec<FuncKeyMapping>,
}

impl FuncKeyTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FuncKeyTemplateId::new(),
            name: name.into(),
            private: false,
            keys: Vec::new(),
        }
    }

    /// Adds a key mapping to the template
    ///
    /// # Errors
    ///
    /// Returns `PositionZero` for position 0 and `PositionTaken` when the
    /// position is already mapped.
    pub fn add_key(&mut self, mapping: FuncKeyMapping) -> Result<(), FuncKeyError> {
        if mapping.position == 0 {
            return Err(FuncKeyError::PositionZero);
        }
        if self.key_at(mapping.position).is_some() {
            return Err(FuncKeyError::PositionTaken(mapping.position));
        }
        self.keys.push(mapping);
        self.keys.sort_by_key(|k| k.position);
        Ok(())
    }

    /// Removes the mapping at a position, if any
    pub fn remove_key(&mut self, position: u16) -> Option<FuncKeyMapping> {
        let index = self.keys.iter().position(|k| k.position == position)?;
        Some(self.keys.remove(index))
    }

    /// The mapping at a position, if any
    pub fn key_at(&self, position: u16) -> Option<&FuncKeyMapping> {
        self.keys.iter().find(|k| k.position == position)
    }

    /// Moves a mapping to a free position
    ///
    /// # Errors
    ///
    /// Returns `PositionTaken` when the target position is mapped, and
    /// `InvalidData` when the source position is not.
    pub fn move_key(&mut self, from: u16, to: u16) -> Result<(), FuncKeyError> {
        if to == 0 {
            return Err(FuncKeyError::PositionZero);
        }
        if from == to {
            return Ok(());
        }
        if self.key_at(to).is_some() {
            return Err(FuncKeyError::PositionTaken(to));
        }
        let Some(key) = self.keys.iter_mut().find(|k| k.position == from) else {
            return Err(FuncKeyError::invalid(format!("no key at position {from}")));
        };
        key.position = to;
        self.keys.sort_by_key(|k| k.position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbx_kernel::UserId;

    fn user_key(position: u16) -> FuncKeyMapping {
        FuncKeyMapping::new(position, FuncKeyDestination::User(UserId::new()))
    }

    #[test]
    fn test_add_keys_sorted() {
        let mut template = FuncKeyTemplate::new("desk");
        template.add_key(user_key(3)).unwrap();
        template.add_key(user_key(1)).unwrap();
        assert_eq!(template.keys[0].position, 1);
        assert_eq!(template.keys[1].position, 3);
    }

    #[test]
    fn test_duplicate_position_rejected() {
        let mut template = FuncKeyTemplate::new("desk");
        template.add_key(user_key(1)).unwrap();
        let err = template.add_key(user_key(1)).unwrap_err();
        assert!(matches!(err, FuncKeyError::PositionTaken(1)));
    }

    #[test]
    fn test_position_zero_rejected() {
        let mut template = FuncKeyTemplate::new("desk");
        assert!(matches!(
            template.add_key(user_key(0)),
            Err(FuncKeyError::PositionZero)
        ));
    }

    #[test]
    fn test_move_key() {
        let mut template = FuncKeyTemplate::new("desk");
        template.add_key(user_key(1)).unwrap();
        template.move_key(1, 5).unwrap();
        assert!(template.key_at(1).is_none());
        assert!(template.key_at(5).is_some());
    }

    #[test]
    fn test_move_onto_taken_position() {
        let mut template = FuncKeyTemplate::new("desk");
        template.add_key(user_key(1)).unwrap();
        template.add_key(user_key(2)).unwrap();
        assert!(matches!(
            template.move_key(1, 2),
            Err(FuncKeyError::PositionTaken(2))
        ));
    }

    #[test]
    fn test_blf_defaults_from_destination() {
        let supervisable = FuncKeyMapping::new(1, FuncKeyDestination::User(UserId::new()));
        assert!(supervisable.blf);
        let plain = FuncKeyMapping::new(2, FuncKeyDestination::Park);
        assert!(!plain.blf);
    }
}
