use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{MatchRecordEntity, TeamScoreEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMatchDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    match_number: u32,
    season: String,
    finished_at: DateTime,
    red: TeamScoreEntity,
    blue: TeamScoreEntity,
}

impl From<MatchRecordEntity> for MongoMatchDocument {
    fn from(value: MatchRecordEntity) -> Self {
        Self {
            id: value.id,
            match_number: value.match_number,
            season: value.season,
            finished_at: DateTime::from_system_time(value.finished_at),
            red: value.red,
            blue: value.blue,
        }
    }
}

impl From<MongoMatchDocument> for MatchRecordEntity {
    fn from(value: MongoMatchDocument) -> Self {
        Self {
            id: value.id,
            match_number: value.match_number,
            season: value.season,
            finished_at: value.finished_at.to_system_time(),
            red: value.red,
            blue: value.blue,
        }
    }
}

fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}
