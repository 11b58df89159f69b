//! Frame capability trait and the polars adapter
//!
//! Operations never touch the underlying engine directly: they depend on
//! the [`Tabular`] trait, which exposes the small set of capabilities the
//! registry actually needs. [`Frame`] is the one shipped adapter, wrapping
//! the polars `DataFrame`; a second engine would mean a second adapter,
//! not new branches at the call sites.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use polars::prelude::*;
use serde_json::Value as JsonValue;

use crate::error::TabulaError;

/// Comparison operator for `filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCmp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl FromStr for FilterCmp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            "lt" => Ok(Self::Lt),
            "le" => Ok(Self::Le),
            "gt" => Ok(Self::Gt),
            "ge" => Ok(Self::Ge),
            other => Err(format!(
                "unknown comparison '{other}' (expected eq|ne|lt|le|gt|ge)"
            )),
        }
    }
}

/// Aggregation for `group_agg`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggKind {
    Sum,
    Mean,
    Min,
    Max,
    Count,
}

impl FromStr for AggKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(Self::Sum),
            "mean" => Ok(Self::Mean),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "count" => Ok(Self::Count),
            other => Err(format!(
                "unknown aggregation '{other}' (expected sum|mean|min|max|count)"
            )),
        }
    }
}

/// Join strategy for `merge`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    fn to_polars(self) -> JoinType {
        match self {
            Self::Inner => JoinType::Inner,
            Self::Left => JoinType::Left,
            Self::Right => JoinType::Right,
            Self::Full => JoinType::Full,
            // cross joins take a dedicated code path, see Tabular::join
            Self::Cross => JoinType::Cross,
        }
    }
}

impl FromStr for JoinKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inner" => Ok(Self::Inner),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "full" | "outer" => Ok(Self::Full),
            "cross" => Ok(Self::Cross),
            other => Err(format!(
                "unknown join strategy '{other}' (expected inner|left|right|full|cross)"
            )),
        }
    }
}

/// Which duplicate to keep in `drop_duplicates`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepRow {
    First,
    Last,
}

impl FromStr for KeepRow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            other => Err(format!("unknown keep strategy '{other}' (expected first|last)")),
        }
    }
}

/// Target dtype for `cast`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeKind {
    Int,
    Float,
    String,
    Bool,
}

impl DtypeKind {
    fn to_polars(self) -> DataType {
        match self {
            Self::Int => DataType::Int64,
            Self::Float => DataType::Float64,
            Self::String => DataType::String,
            Self::Bool => DataType::Boolean,
        }
    }
}

impl FromStr for DtypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "string" | "str" => Ok(Self::String),
            "bool" => Ok(Self::Bool),
            other => Err(format!(
                "unknown dtype '{other}' (expected int|float|string|bool)"
            )),
        }
    }
}

/// Capabilities the operation registry needs from a frame engine
pub trait Tabular: Sized {
    fn height(&self) -> usize;
    fn width(&self) -> usize;
    fn column_names(&self) -> Vec<String>;
    fn column(&self, name: &str) -> Result<Series, TabulaError>;
    fn cell(&self, row: usize, column: &str) -> Result<JsonValue, TabulaError>;

    fn drop_nulls(&self, subset: Option<&[String]>) -> Result<Self, TabulaError>;
    fn fill_nulls(
        &self,
        value: &JsonValue,
        subset: Option<&[String]>,
    ) -> Result<Self, TabulaError>;
    fn drop_duplicates(
        &self,
        subset: Option<&[String]>,
        keep: KeepRow,
    ) -> Result<Self, TabulaError>;
    fn null_counts(&self) -> Self;
    fn rename(&self, mapping: &[(String, String)]) -> Result<Self, TabulaError>;
    fn head(&self, n: usize) -> Self;
    fn sort_by(&self, by: &[String], descending: bool) -> Result<Self, TabulaError>;
    fn sample(&self, n: usize, seed: Option<u64>) -> Result<Self, TabulaError>;
    fn cast(&self, column: &str, dtype: DtypeKind) -> Result<Self, TabulaError>;
    fn filter(
        &self,
        column: &str,
        cmp: FilterCmp,
        value: &JsonValue,
    ) -> Result<Self, TabulaError>;
    fn group_agg(
        &self,
        by: &[String],
        column: &str,
        agg: AggKind,
    ) -> Result<Self, TabulaError>;
    fn join(&self, other: &Self, on: &[String], how: JoinKind) -> Result<Self, TabulaError>;
    fn vstack(&self, other: &Self) -> Result<Self, TabulaError>;
    fn one_hot(&self, columns: &[String], drop_first: bool) -> Result<Self, TabulaError>;
    fn scale_min_max(&self, columns: &[String]) -> Result<Self, TabulaError>;
    fn merge_rare(&self, column: &str, threshold: f64) -> Result<Self, TabulaError>;
}

/// Polars-backed frame adapter
#[derive(Debug, Clone)]
pub struct Frame(pub DataFrame);

impl Frame {
    pub fn new(df: DataFrame) -> Self {
        Frame(df)
    }

    pub fn inner(&self) -> &DataFrame {
        &self.0
    }

    pub fn read_csv(path: &Path, separator: u8, has_header: bool) -> Result<Self, TabulaError> {
        let df = CsvReadOptions::default()
            .with_has_header(has_header)
            .map_parse_options(|opts| opts.with_separator(separator))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        Ok(Frame(df))
    }

    pub fn read_parquet(path: &Path) -> Result<Self, TabulaError> {
        let file = File::open(path)?;
        Ok(Frame(ParquetReader::new(file).finish()?))
    }

    /// Reads a JSON array of records
    pub fn read_json(path: &Path) -> Result<Self, TabulaError> {
        let file = File::open(path)?;
        Ok(Frame(JsonReader::new(file).finish()?))
    }

    pub fn write_csv(&self, path: &Path, separator: u8) -> Result<(), TabulaError> {
        let mut df = self.0.clone();
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(separator)
            .finish(&mut df)?;
        Ok(())
    }

    pub fn write_parquet(&self, path: &Path) -> Result<(), TabulaError> {
        let mut df = self.0.clone();
        let file = File::create(path)?;
        ParquetWriter::new(file).finish(&mut df)?;
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<(), TabulaError> {
        let mut df = self.0.clone();
        let file = File::create(path)?;
        JsonWriter::new(file)
            .with_json_format(JsonFormat::Json)
            .finish(&mut df)?;
        Ok(())
    }
}

/// Render a single frame value as JSON; non-scalar dtypes fall back to
/// their display form
fn any_value_to_json(value: AnyValue) -> JsonValue {
    match value {
        AnyValue::Null => JsonValue::Null,
        AnyValue::Boolean(b) => JsonValue::from(b),
        AnyValue::String(s) => JsonValue::from(s),
        AnyValue::StringOwned(s) => JsonValue::from(s.as_str()),
        AnyValue::Int8(v) => JsonValue::from(v),
        AnyValue::Int16(v) => JsonValue::from(v),
        AnyValue::Int32(v) => JsonValue::from(v),
        AnyValue::Int64(v) => JsonValue::from(v),
        AnyValue::UInt8(v) => JsonValue::from(v),
        AnyValue::UInt16(v) => JsonValue::from(v),
        AnyValue::UInt32(v) => JsonValue::from(v),
        AnyValue::UInt64(v) => JsonValue::from(v),
        AnyValue::Float32(v) => JsonValue::from(v),
        AnyValue::Float64(v) => JsonValue::from(v),
        other => JsonValue::from(other.to_string()),
    }
}

/// Turn a JSON scalar into a polars literal expression
fn literal_expr(name: &str, value: &JsonValue) -> Result<Expr, TabulaError> {
    match value {
        JsonValue::Bool(b) => Ok(lit(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(lit(i))
            } else if let Some(f) = n.as_f64() {
                Ok(lit(f))
            } else {
                Err(TabulaError::argument(name, "unsupported numeric literal"))
            }
        }
        JsonValue::String(s) => Ok(lit(s.clone())),
        other => Err(TabulaError::argument(
            name,
            format!("expected a scalar, got {other}"),
        )),
    }
}

impl Tabular for Frame {
    fn height(&self) -> usize {
        self.0.height()
    }

    fn width(&self) -> usize {
        self.0.width()
    }

    fn column_names(&self) -> Vec<String> {
        self.0
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect()
    }

    fn column(&self, name: &str) -> Result<Series, TabulaError> {
        Ok(self.0.column(name)?.as_materialized_series().clone())
    }

    fn cell(&self, row: usize, column: &str) -> Result<JsonValue, TabulaError> {
        let series = self.0.column(column)?.as_materialized_series();
        if row >= series.len() {
            return Err(TabulaError::argument(
                "row",
                format!("index {row} out of bounds for {} rows", series.len()),
            ));
        }
        Ok(any_value_to_json(series.get(row)?))
    }

    fn drop_nulls(&self, subset: Option<&[String]>) -> Result<Self, TabulaError> {
        Ok(Frame(self.0.drop_nulls(subset)?))
    }

    fn fill_nulls(
        &self,
        value: &JsonValue,
        subset: Option<&[String]>,
    ) -> Result<Self, TabulaError> {
        let fill = literal_expr("value", value)?;
        let exprs = match subset {
            Some(cols) => cols
                .iter()
                .map(|c| col(c.as_str()).fill_null(fill.clone()))
                .collect(),
            None => vec![all().fill_null(fill)],
        };
        Ok(Frame(self.0.clone().lazy().with_columns(exprs).collect()?))
    }

    fn drop_duplicates(
        &self,
        subset: Option<&[String]>,
        keep: KeepRow,
    ) -> Result<Self, TabulaError> {
        let strategy = match keep {
            KeepRow::First => UniqueKeepStrategy::First,
            KeepRow::Last => UniqueKeepStrategy::Last,
        };
        let subset: Option<Vec<String>> = subset.map(|cols| cols.to_vec());
        Ok(Frame(self.0.unique_stable(subset.as_deref(), strategy, None)?))
    }

    fn null_counts(&self) -> Self {
        Frame(self.0.null_count())
    }

    fn rename(&self, mapping: &[(String, String)]) -> Result<Self, TabulaError> {
        let mut df = self.0.clone();
        for (old, new) in mapping {
            df.rename(old, new.as_str().into())?;
        }
        Ok(Frame(df))
    }

    fn head(&self, n: usize) -> Self {
        Frame(self.0.head(Some(n)))
    }

    fn sort_by(&self, by: &[String], descending: bool) -> Result<Self, TabulaError> {
        let options = SortMultipleOptions::default().with_order_descending(descending);
        Ok(Frame(self.0.sort(by.to_vec(), options)?))
    }

    fn sample(&self, n: usize, seed: Option<u64>) -> Result<Self, TabulaError> {
        Ok(Frame(self.0.sample_n_literal(n, false, true, seed)?))
    }

    fn cast(&self, column: &str, dtype: DtypeKind) -> Result<Self, TabulaError> {
        let df = self
            .0
            .clone()
            .lazy()
            .with_column(col(column).cast(dtype.to_polars()))
            .collect()?;
        Ok(Frame(df))
    }

    fn filter(
        &self,
        column: &str,
        cmp: FilterCmp,
        value: &JsonValue,
    ) -> Result<Self, TabulaError> {
        let lhs = col(column);
        let rhs = literal_expr("value", value)?;
        let predicate = match cmp {
            FilterCmp::Eq => lhs.eq(rhs),
            FilterCmp::Ne => lhs.neq(rhs),
            FilterCmp::Lt => lhs.lt(rhs),
            FilterCmp::Le => lhs.lt_eq(rhs),
            FilterCmp::Gt => lhs.gt(rhs),
            FilterCmp::Ge => lhs.gt_eq(rhs),
        };
        Ok(Frame(self.0.clone().lazy().filter(predicate).collect()?))
    }

    fn group_agg(
        &self,
        by: &[String],
        column: &str,
        agg: AggKind,
    ) -> Result<Self, TabulaError> {
        let keys: Vec<Expr> = by.iter().map(|c| col(c.as_str())).collect();
        let value = col(column);
        let agg_expr = match agg {
            AggKind::Sum => value.sum(),
            AggKind::Mean => value.mean(),
            AggKind::Min => value.min(),
            AggKind::Max => value.max(),
            AggKind::Count => value.count(),
        };
        let df = self
            .0
            .clone()
            .lazy()
            .group_by_stable(keys)
            .agg([agg_expr])
            .collect()?;
        Ok(Frame(df))
    }

    fn join(&self, other: &Self, on: &[String], how: JoinKind) -> Result<Self, TabulaError> {
        let lf = self.0.clone().lazy();
        let other_lf = other.0.clone().lazy();
        let df = if how == JoinKind::Cross {
            lf.cross_join(other_lf, None).collect()?
        } else {
            let on_exprs: Vec<Expr> = on.iter().map(|c| col(c.as_str())).collect();
            lf.join(
                other_lf,
                on_exprs.clone(),
                on_exprs,
                JoinArgs::new(how.to_polars()),
            )
            .collect()?
        };
        Ok(Frame(df))
    }

    fn vstack(&self, other: &Self) -> Result<Self, TabulaError> {
        Ok(Frame(self.0.vstack(&other.0)?))
    }

    fn one_hot(&self, columns: &[String], drop_first: bool) -> Result<Self, TabulaError> {
        let cols: Vec<&str> = columns.iter().map(String::as_str).collect();
        Ok(Frame(self.0.columns_to_dummies(cols, None, drop_first)?))
    }

    fn scale_min_max(&self, columns: &[String]) -> Result<Self, TabulaError> {
        // constant columns scale to null (0/0); callers see it in the data
        let exprs: Vec<Expr> = columns
            .iter()
            .map(|c| {
                let x = col(c.as_str()).cast(DataType::Float64);
                ((x.clone() - x.clone().min()) / (x.clone().max() - x.min()))
                    .alias(c.as_str())
            })
            .collect();
        Ok(Frame(self.0.clone().lazy().with_columns(exprs).collect()?))
    }

    fn merge_rare(&self, column: &str, threshold: f64) -> Result<Self, TabulaError> {
        let series = self
            .0
            .column(column)?
            .cast(&DataType::String)?
            .take_materialized_series();
        let ca = series.str()?;
        let total = (series.len() - series.null_count()) as f64;
        if total == 0.0 {
            return Ok(self.clone());
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in ca.into_iter().flatten() {
            *counts.entry(value).or_insert(0) += 1;
        }

        let replaced: StringChunked = ca
            .into_iter()
            .map(|opt| {
                opt.map(|v| {
                    let freq = counts.get(v).copied().unwrap_or(0) as f64 / total;
                    if freq < threshold {
                        "Other"
                    } else {
                        v
                    }
                })
            })
            .collect();

        let mut df = self.0.clone();
        df.with_column(replaced.into_series().with_name(column.into()))?;
        Ok(Frame(df))
    }
}
