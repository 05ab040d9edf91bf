//! Piece persistence
//!
//! [`PieceStore`] validates creation requests and keeps piece records in the
//! `pieces` table. Every operation is a single SQL statement, so concurrent
//! requests never observe a half-written record.

use chess_rules::{PieceColor, PieceKind, RulesError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use crate::error::{ApiError, ApiResult, FieldErrors};

/// A stored piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: PieceColor,
}

/// Body of a creation request, before validation
///
/// Fields stay untyped so every invalid field can be reported at once.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewPiece {
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub color: Option<Value>,
}

impl NewPiece {
    pub fn new(kind: &str, color: &str) -> Self {
        NewPiece {
            kind: Some(Value::from(kind)),
            color: Some(Value::from(color)),
        }
    }

    /// Check both fields against their closed sets of choices
    pub fn validate(&self) -> Result<(PieceKind, PieceColor), FieldErrors> {
        let mut errors = FieldErrors::default();

        let kind = choice(&mut errors, "type", self.kind.as_ref());
        let color = choice(&mut errors, "color", self.color.as_ref());

        match (kind, color) {
            (Some(kind), Some(color)) if errors.is_empty() => Ok((kind, color)),
            _ => Err(errors),
        }
    }
}

fn choice<T>(errors: &mut FieldErrors, field: &'static str, value: Option<&Value>) -> Option<T>
where
    T: std::str::FromStr<Err = RulesError>,
{
    let Some(value) = value.filter(|v| !v.is_null()) else {
        errors.add(field, "This field is required.");
        return None;
    };

    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(field, format!("\"{raw}\" is not a valid choice."));
            None
        }
    }
}

#[derive(Clone)]
pub struct PieceStore {
    db: Pool<Sqlite>,
}

impl PieceStore {
    pub fn new(db: Pool<Sqlite>) -> Self {
        PieceStore { db }
    }

    /// Create the `pieces` table if it does not exist yet
    pub async fn init_schema(&self) -> ApiResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS pieces (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL
                    CHECK (kind IN ('Pawn', 'Knight', 'Bishop', 'Rook', 'Queen', 'King')),
                color TEXT NOT NULL CHECK (color IN ('white', 'black')),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );",
        )
        .execute(&self.db)
        .await?;
        Ok(())
    }

    /// Validate and persist a new piece
    ///
    /// On a validation failure nothing is written and every invalid field is reported.
    pub async fn create(&self, request: &NewPiece) -> ApiResult<Piece> {
        let (kind, color) = request.validate().map_err(ApiError::Validation)?;

        let row = sqlx::query("INSERT INTO pieces (kind, color) VALUES (?, ?) RETURNING id")
            .bind(kind.as_str())
            .bind(color.as_str())
            .fetch_one(&self.db)
            .await?;

        let piece = Piece {
            id: row.try_get("id")?,
            kind,
            color,
        };
        tracing::info!(id = piece.id, kind = %kind, color = %color, "created piece");
        Ok(piece)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Piece> {
        sqlx::query("SELECT id, kind, color FROM pieces WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .map(|row| piece_from_row(&row))
            .transpose()?
            .ok_or(ApiError::NotFound { id })
    }

    /// All pieces, oldest first
    pub async fn list(&self) -> ApiResult<Vec<Piece>> {
        let rows = sqlx::query("SELECT id, kind, color FROM pieces ORDER BY id")
            .fetch_all(&self.db)
            .await?;

        rows.iter()
            .map(|row| piece_from_row(row).map_err(ApiError::from))
            .collect()
    }

    pub async fn count(&self) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM pieces")
            .fetch_one(&self.db)
            .await?;
        Ok(row.try_get("n")?)
    }
}

fn piece_from_row(row: &SqliteRow) -> Result<Piece, sqlx::Error> {
    let kind: String = row.try_get("kind")?;
    let color: String = row.try_get("color")?;

    Ok(Piece {
        id: row.try_get("id")?,
        kind: kind.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        color: color.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
    })
}
