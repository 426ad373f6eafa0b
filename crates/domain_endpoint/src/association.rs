//! User/line and line/extension associations
//!
//! These are the referential rules the original DAO enforced with
//! sequential queries: every line has exactly one main user, every user has
//! one main line, and extensions attach to lines. `AssociationSet` is the
//! in-memory model of those two tables; the repository mirrors the same
//! rules transactionally.

use serde::{Deserialize, Serialize};

use pbx_kernel::{ExtensionId, LineId, UserId};

use crate::error::EndpointError;

/// A user-to-line association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLine {
    pub user_id: UserId,
    pub line_id: LineId,
    /// The owning user of the line; exactly one per line
    pub main_user: bool,
    /// The user's preferred line; one per user
    pub main_line: bool,
}

/// A line-to-extension association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineExtension {
    pub line_id: LineId,
    pub extension_id: ExtensionId,
    pub main_extension: bool,
}

/// The association state of a set of users, lines, and extensions
#[derive(Debug, Clone, Default)]
pub struct AssociationSet {
    user_lines: Vec<UserLine>,
    line_extensions: Vec<LineExtension>,
}

impl AssociationSet {
    /// Associates a user to a line
    ///
    /// The first user associated to a line becomes its main user. The
    /// first line associated to a user becomes that user's main line.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyAssociated` when the pair already exists.
    pub fn associate_user(
        &mut self,
        user_id: UserId,
        line_id: LineId,
    ) -> Result<UserLine, EndpointError> {
        if self.find_user_line(user_id, line_id).is_some() {
            return Err(EndpointError::AlreadyAssociated(
                user_id.to_string(),
                line_id.to_string(),
            ));
        }

        let association = UserLine {
            user_id,
            line_id,
            main_user: self.main_user_of(line_id).is_none(),
            main_line: self.main_line_of(user_id).is_none(),
        };
        self.user_lines.push(association);
        Ok(association)
    }

    /// Dissociates a user from a line
    ///
    /// # Errors
    ///
    /// Returns `NotAssociated` when the pair does not exist, and
    /// `MainUserHasSecondaries` when the main user would leave secondary
    /// users behind on the line.
    pub fn dissociate_user(&mut self, user_id: UserId, line_id: LineId) -> Result<(), EndpointError> {
        let Some(index) = self
            .user_lines
            .iter()
            .position(|ul| ul.user_id == user_id && ul.line_id == line_id)
        else {
            return Err(EndpointError::NotAssociated(
                user_id.to_string(),
                line_id.to_string(),
            ));
        };

        if self.user_lines[index].main_user && self.users_of_line(line_id).len() > 1 {
            return Err(EndpointError::MainUserHasSecondaries(line_id.to_string()));
        }

        self.user_lines.remove(index);
        Ok(())
    }

    /// Associates an extension to a line; the first becomes main
    ///
    /// # Errors
    ///
    /// Returns `AlreadyAssociated` when the pair already exists.
    pub fn associate_extension(
        &mut self,
        line_id: LineId,
        extension_id: ExtensionId,
    ) -> Result<LineExtension, EndpointError> {
        if self
            .line_extensions
            .iter()
            .any(|le| le.line_id == line_id && le.extension_id == extension_id)
        {
            return Err(EndpointError::AlreadyAssociated(
                line_id.to_string(),
                extension_id.to_string(),
            ));
        }

        let association = LineExtension {
            line_id,
            extension_id,
            main_extension: !self
                .line_extensions
                .iter()
                .any(|le| le.line_id == line_id && le.main_extension),
        };
        self.line_extensions.push(association);
        Ok(association)
    }

    /// Dissociates an extension from a line
    pub fn dissociate_extension(
        &mut self,
        line_id: LineId,
        extension_id: ExtensionId,
    ) -> Result<(), EndpointError> {
        let Some(index) = self
            .line_extensions
            .iter()
            .position(|le| le.line_id == line_id && le.extension_id == extension_id)
        else {
            return Err(EndpointError::NotAssociated(
                line_id.to_string(),
                extension_id.to_string(),
            ));
        };
        self.line_extensions.remove(index);
        Ok(())
    }

    /// The main user of a line, when the line is associated at all
    pub fn main_user_of(&self, line_id: LineId) -> Option<UserId> {
        self.user_lines
            .iter()
            .find(|ul| ul.line_id == line_id && ul.main_user)
            .map(|ul| ul.user_id)
    }

    /// The main line of a user
    pub fn main_line_of(&self, user_id: UserId) -> Option<LineId> {
        self.user_lines
            .iter()
            .find(|ul| ul.user_id == user_id && ul.main_line)
            .map(|ul| ul.line_id)
    }

    pub fn is_main_user(&self, user_id: UserId, line_id: LineId) -> bool {
        self.find_user_line(user_id, line_id)
            .map(|ul| ul.main_user)
            .unwrap_or(false)
    }

    /// All users associated to a line, main user first
    pub fn users_of_line(&self, line_id: LineId) -> Vec<UserId> {
        let mut users: Vec<&UserLine> = self
            .user_lines
            .iter()
            .filter(|ul| ul.line_id == line_id)
            .collect();
        users.sort_by_key(|ul| !ul.main_user);
        users.into_iter().map(|ul| ul.user_id).collect()
    }

    /// All lines associated to a user, main line first
    pub fn lines_of_user(&self, user_id: UserId) -> Vec<LineId> {
        let mut lines: Vec<&UserLine> = self
            .user_lines
            .iter()
            .filter(|ul| ul.user_id == user_id)
            .collect();
        lines.sort_by_key(|ul| !ul.main_line);
        lines.into_iter().map(|ul| ul.line_id).collect()
    }

    /// Extensions attached to a line, main extension first
    pub fn extensions_of_line(&self, line_id: LineId) -> Vec<ExtensionId> {
        let mut extens: Vec<&LineExtension> = self
            .line_extensions
            .iter()
            .filter(|le| le.line_id == line_id)
            .collect();
        extens.sort_by_key(|le| !le.main_extension);
        extens.into_iter().map(|le| le.extension_id).collect()
    }

    fn find_user_line(&self, user_id: UserId, line_id: LineId) -> Option<&UserLine> {
        self.user_lines
            .iter()
            .find(|ul| ul.user_id == user_id && ul.line_id == line_id)
    }
}
