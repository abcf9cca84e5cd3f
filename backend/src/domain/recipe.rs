//! Recipe data model.
//!
//! Recipes are owned exclusively by one user and are only ever created by
//! that user. Storage cascades their deletion with the owner.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;
use super::validation::{ValidationErrors, validate_instructions, validate_title};

/// Server-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated fields for a recipe that has not been stored yet.
///
/// # Examples
/// ```
/// use recipe_backend::domain::RecipeDraft;
///
/// let draft = RecipeDraft::try_from_parts(
///     Some("Ham".to_owned()),
///     Some("Slice the ham thinly, then fry it gently until crisp at the edges.".to_owned()),
///     Some(15),
/// )
/// .unwrap();
/// assert_eq!(draft.title(), "Ham");
///
/// let errors = RecipeDraft::try_from_parts(Some("Ham".to_owned()), Some("short".to_owned()), None)
///     .unwrap_err();
/// assert_eq!(errors.as_slice().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    title: String,
    instructions: String,
    minutes_to_complete: Option<i32>,
}

impl RecipeDraft {
    /// Validate raw recipe inputs. Missing text fields are treated as empty.
    pub fn try_from_parts(
        title: Option<String>,
        instructions: Option<String>,
        minutes_to_complete: Option<i32>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = errors.check(validate_title(title.unwrap_or_default()));
        let instructions = errors.check(validate_instructions(instructions.unwrap_or_default()));

        match (title, instructions) {
            (Some(title), Some(instructions)) => Ok(Self {
                title,
                instructions,
                minutes_to_complete,
            }),
            _ => Err(errors),
        }
    }

    /// Recipe title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Preparation instructions.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Optional preparation time in minutes.
    pub fn minutes_to_complete(&self) -> Option<i32> {
        self.minutes_to_complete
    }

    /// Attach identity and ownership, producing a storable recipe.
    pub fn into_recipe(self, id: RecipeId, owner: UserId) -> Recipe {
        Recipe {
            id,
            title: self.title,
            instructions: self.instructions,
            minutes_to_complete: self.minutes_to_complete,
            owner,
        }
    }
}

/// A stored recipe.
///
/// Serialises to its public fields; the owner is implied by the session that
/// requested it and is not echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Recipe {
    #[schema(value_type = String, example = "1b4e28ba-2fa1-11d2-883f-0016d3cca427")]
    id: RecipeId,
    #[schema(example = "Delicious Shed Ham")]
    title: String,
    instructions: String,
    #[schema(example = 60)]
    minutes_to_complete: Option<i32>,
    #[serde(skip)]
    owner: UserId,
}

impl Recipe {
    /// Rebuild a recipe read back from storage.
    ///
    /// Storage enforces the same constraints as [`RecipeDraft`], so the
    /// fields are not validated again.
    pub fn restore(
        id: RecipeId,
        owner: UserId,
        title: String,
        instructions: String,
        minutes_to_complete: Option<i32>,
    ) -> Self {
        Self {
            id,
            title,
            instructions,
            minutes_to_complete,
            owner,
        }
    }

    /// Recipe identifier.
    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// Recipe title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Preparation instructions.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Optional preparation time in minutes.
    pub fn minutes_to_complete(&self) -> Option<i32> {
        self.minutes_to_complete
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }
}
