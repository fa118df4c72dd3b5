//! Module: model::condition
//! Responsibility: the static SearchConditionCatalog rendered to clients as
//! filter options, and bucket membership of numeric attribute values.
//! Boundary: loaded once at startup; never mutated afterwards.

use crate::model::NumField;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Bound value meaning "no limit on this side".
pub const UNBOUNDED: i64 = -1;

///
/// ConditionError
///

#[derive(Debug, ThisError)]
pub enum ConditionError {
    #[error("failed to read condition file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed condition document '{name}': {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },
}

///
/// RangeBucket
///
/// `min` is inclusive and `max` exclusive; [`UNBOUNDED`] disables a side.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RangeBucket {
    pub id: i64,
    pub min: i64,
    pub max: i64,
}

impl RangeBucket {
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        let value = i128::from(value);
        let above_min = self.min == UNBOUNDED || value >= i128::from(self.min);
        let below_max = self.max == UNBOUNDED || value < i128::from(self.max);

        above_min && below_max
    }
}

///
/// RangeCondition
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RangeCondition {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub ranges: Vec<RangeBucket>,
}

impl RangeCondition {
    #[must_use]
    pub fn bucket(&self, id: i64) -> Option<&RangeBucket> {
        self.ranges.iter().find(|bucket| bucket.id == id)
    }

    /// Id of the first bucket holding `value`.
    #[must_use]
    pub fn bucket_of(&self, value: u64) -> Option<i64> {
        self.ranges
            .iter()
            .find(|bucket| bucket.contains(value))
            .map(|bucket| bucket.id)
    }
}

///
/// ListCondition
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ListCondition {
    pub list: Vec<String>,
}

///
/// FurnitureConditions
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FurnitureConditions {
    pub width: RangeCondition,
    pub height: RangeCondition,
    pub depth: RangeCondition,
    pub price: RangeCondition,
    pub color: ListCondition,
    pub feature: ListCondition,
    pub kind: ListCondition,
}

///
/// SpaceConditions
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceConditions {
    pub door_width: RangeCondition,
    pub door_height: RangeCondition,
    pub rent: RangeCondition,
    pub feature: ListCondition,
}

///
/// SearchConditionCatalog
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchConditionCatalog {
    pub furniture: FurnitureConditions,
    pub space: SpaceConditions,
}

impl SearchConditionCatalog {
    /// Parse both halves from their JSON documents.
    pub fn from_json(furniture: &str, space: &str) -> Result<Self, ConditionError> {
        let furniture = serde_json::from_str(furniture).map_err(|source| ConditionError::Json {
            name: "furniture".to_string(),
            source,
        })?;
        let space = serde_json::from_str(space).map_err(|source| ConditionError::Json {
            name: "space".to_string(),
            source,
        })?;

        Ok(Self { furniture, space })
    }

    /// Read both halves from JSON files.
    pub fn load(
        furniture: impl AsRef<Path>,
        space: impl AsRef<Path>,
    ) -> Result<Self, ConditionError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|source| ConditionError::Read {
                path: path.display().to_string(),
                source,
            })
        };

        Self::from_json(&read(furniture.as_ref())?, &read(space.as_ref())?)
    }

    /// Bucket definitions for a numeric attribute.
    #[must_use]
    pub const fn range(&self, field: NumField) -> &RangeCondition {
        match field {
            NumField::Price => &self.furniture.price,
            NumField::Height => &self.furniture.height,
            NumField::Width => &self.furniture.width,
            NumField::Depth => &self.furniture.depth,
            NumField::Rent => &self.space.rent,
            NumField::DoorWidth => &self.space.door_width,
            NumField::DoorHeight => &self.space.door_height,
        }
    }

    /// Default filter catalog, used when no condition files are configured.
    #[must_use]
    pub fn standard() -> Self {
        let size = || {
            ranges(
                "",
                "cm",
                &[(UNBOUNDED, 80), (80, 110), (110, 150), (150, UNBOUNDED)],
            )
        };

        Self {
            furniture: FurnitureConditions {
                width: size(),
                height: size(),
                depth: size(),
                price: ranges(
                    "",
                    "円",
                    &[
                        (UNBOUNDED, 3000),
                        (3000, 6000),
                        (6000, 9000),
                        (9000, 12000),
                        (12000, 15000),
                        (15000, UNBOUNDED),
                    ],
                ),
                color: list(&[
                    "黒", "白", "赤", "青", "緑", "黄", "紫", "ピンク", "オレンジ", "水色", "ネイビー",
                    "ベージュ",
                ]),
                feature: list(&[
                    "折りたたみ可",
                    "肘掛け",
                    "キャスター",
                    "リクライニング",
                    "高さ調節可",
                    "フットレスト",
                ]),
                kind: list(&["ゲーミングチェア", "座椅子", "エルゴノミクス", "ハンモック"]),
            },
            space: SpaceConditions {
                door_width: size(),
                door_height: size(),
                rent: ranges(
                    "",
                    "円",
                    &[
                        (UNBOUNDED, 50000),
                        (50000, 100_000),
                        (100_000, 150_000),
                        (150_000, UNBOUNDED),
                    ],
                ),
                feature: list(&[
                    "最上階",
                    "防犯カメラ",
                    "ウォークインクローゼット",
                    "ワンルーム",
                    "ルーフバルコニー付",
                    "エアコン付き",
                    "駐輪場あり",
                    "プロパンガス",
                    "駐車場あり",
                    "防音室",
                ]),
            },
        }
    }
}

fn ranges(prefix: &str, suffix: &str, bounds: &[(i64, i64)]) -> RangeCondition {
    RangeCondition {
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
        ranges: bounds
            .iter()
            .zip(0..)
            .map(|(&(min, max), id)| RangeBucket { id, min, max })
            .collect(),
    }
}

fn list(items: &[&str]) -> ListCondition {
    ListCondition {
        list: items.iter().map(|item| (*item).to_string()).collect(),
    }
}
