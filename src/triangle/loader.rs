//! Load triangles from a CSV file
//!
//! Expected layout: a discriminator column (`Type`), an origin index column
//! (`AY`), and one column per development age named by the age ("12", "24", ...).
//! Empty cells are ages the origin period has not reached yet.

use super::{MeasureType, Triangle, TriangleSet};
use crate::error::{IndicationError, Result};
use csv::{Reader, StringRecord};
use log::debug;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Column naming conventions of a triangle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleLayout {
    pub type_column: String,
    pub index_column: String,
}

impl Default for TriangleLayout {
    fn default() -> Self {
        Self {
            type_column: "Type".to_string(),
            index_column: "AY".to_string(),
        }
    }
}

/// Header positions resolved once per file
struct Columns {
    type_pos: usize,
    index_pos: usize,
    ages: Vec<(usize, u32)>,
}

impl Columns {
    fn resolve(headers: &StringRecord, layout: &TriangleLayout) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| IndicationError::InvalidHeader(format!("missing column {:?}", name)))
        };
        let type_pos = find(&layout.type_column)?;
        let index_pos = find(&layout.index_column)?;

        let mut ages = Vec::new();
        for (pos, header) in headers.iter().enumerate() {
            if pos == type_pos || pos == index_pos {
                continue;
            }
            let age: u32 = header.trim().parse().map_err(|_| {
                IndicationError::InvalidHeader(format!("{:?} is not a development age", header))
            })?;
            ages.push((pos, age));
        }

        if ages.is_empty() {
            return Err(IndicationError::InvalidHeader(
                "no development age columns".to_string(),
            ));
        }

        Ok(Self {
            type_pos,
            index_pos,
            ages,
        })
    }

    fn age_list(&self) -> Vec<u32> {
        self.ages.iter().map(|&(_, age)| age).collect()
    }
}

#[derive(Default)]
struct TriangleRows {
    origins: Vec<i32>,
    values: Vec<Vec<Option<f64>>>,
}

fn parse_cell(raw: &str, field: u32) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw == "<NA>" {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| IndicationError::Parse {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

fn read_triangles<R: Read>(mut reader: Reader<R>, layout: &TriangleLayout) -> Result<TriangleSet> {
    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers, layout)?;

    let mut grouped: BTreeMap<MeasureType, TriangleRows> = BTreeMap::new();

    for result in reader.records() {
        let record = result?;
        let measure: MeasureType = record
            .get(columns.type_pos)
            .unwrap_or_default()
            .parse()
            .unwrap_or_else(|never| match never {});

        let raw_origin = record.get(columns.index_pos).unwrap_or_default().trim();
        let origin: i32 = raw_origin.parse().map_err(|_| IndicationError::Parse {
            field: layout.index_column.clone(),
            value: raw_origin.to_string(),
        })?;

        let cells = columns
            .ages
            .iter()
            .map(|&(pos, age)| parse_cell(record.get(pos).unwrap_or_default(), age))
            .collect::<Result<Vec<_>>>()?;

        let rows = grouped.entry(measure).or_default();
        rows.origins.push(origin);
        rows.values.push(cells);
    }

    let ages = columns.age_list();
    let mut set = TriangleSet::new();
    for (measure, rows) in grouped {
        debug!("Loaded {} triangle: {} origin periods", measure, rows.origins.len());
        set.insert(Triangle::new(measure, rows.origins, ages.clone(), rows.values)?);
    }

    Ok(set)
}

/// Load all triangles from a CSV file
pub fn load_triangles<P: AsRef<Path>>(path: P, layout: &TriangleLayout) -> Result<TriangleSet> {
    let reader = Reader::from_path(path)?;
    read_triangles(reader, layout)
}

/// Load triangles from any reader (e.g., string buffer, network stream)
pub fn load_triangles_from_reader<R: Read>(reader: R, layout: &TriangleLayout) -> Result<TriangleSet> {
    read_triangles(Reader::from_reader(reader), layout)
}
