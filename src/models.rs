use serde::{Deserialize, Serialize};

use crate::entities::film;

/// A stored film, always handed out by value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub status: String,
    pub date_added: String,
    pub note: String,
}

/// Everything about a film except its id. Used for both create and update;
/// an `id` in the incoming payload is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmFields {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub director: Option<String>,
    pub status: String,
    pub date_added: String,
    pub note: String,
}

impl FilmFields {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty");
        }
        Ok(())
    }

    pub fn into_film(self, id: i64) -> Film {
        Film {
            id,
            title: self.title,
            year: self.year,
            director: self.director,
            status: self.status,
            date_added: self.date_added,
            note: self.note,
        }
    }
}

impl From<film::Model> for Film {
    fn from(row: film::Model) -> Self {
        Self {
            id: row.id,
            title: row.title,
            year: row.year,
            director: row.director,
            status: row.status,
            date_added: row.date_added,
            note: row.note,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
