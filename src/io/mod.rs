// src/io/mod.rs
pub mod xyz;

use crate::error::XyzError;
use crate::model::Model;

pub fn load_model(path: &str) -> Result<Model, XyzError> {
    let p = path.to_lowercase();

    if p.ends_with(".xyz") || p.ends_with(".extxyz") {
        xyz::parse(path)
    } else {
        Err(XyzError::UnsupportedFormat(path.to_string()))
    }
}

pub fn save_model(path: &str, model: &Model, include_comment: bool) -> Result<(), XyzError> {
    let p = path.to_lowercase();

    if p.ends_with(".xyz") || p.ends_with(".extxyz") {
        xyz::write(path, model, include_comment)
    } else {
        Err(XyzError::UnsupportedFormat(path.to_string()))
    }
}
