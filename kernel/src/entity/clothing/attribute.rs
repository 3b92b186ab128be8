use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ClothingName(String);

impl ClothingName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Garment type as entered by staff, e.g. "dress" or "suit".
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ClothingType(String);

impl ClothingType {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ClothingSize(String);

impl ClothingSize {
    pub fn new(size: impl Into<String>) -> Self {
        Self(size.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ClothingColor(String);

impl ClothingColor {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ClothingCategory(String);

impl ClothingCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }
}
