//! Operation registry
//!
//! A fixed, process-wide table from operation name to function. Unknown
//! names are not an error here: the dispatcher decides what a failed
//! lookup means (it skips the node and keeps going).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::ops::{self, OpFn};

static REGISTRY: Lazy<HashMap<&'static str, OpFn>> = Lazy::new(|| {
    let mut ops: HashMap<&'static str, OpFn> = HashMap::new();

    // ingest / egress
    ops.insert("read_csv", ops::io::read_csv as OpFn);
    ops.insert("read_parquet", ops::io::read_parquet as OpFn);
    ops.insert("read_json", ops::io::read_json as OpFn);
    ops.insert("write_csv", ops::io::write_csv as OpFn);
    ops.insert("write_parquet", ops::io::write_parquet as OpFn);
    ops.insert("write_json", ops::io::write_json as OpFn);

    // cleaning
    ops.insert("drop_nans", ops::clean::drop_nans as OpFn);
    ops.insert("fill_nans", ops::clean::fill_nans as OpFn);
    ops.insert("drop_duplicates", ops::clean::drop_duplicates as OpFn);
    ops.insert("null_counts", ops::clean::null_counts as OpFn);
    ops.insert("rename", ops::clean::rename as OpFn);
    ops.insert("head", ops::clean::head as OpFn);

    // combining
    ops.insert("merge", ops::combine::merge as OpFn);
    ops.insert("concat", ops::combine::concat as OpFn);

    // selection / transformation
    ops.insert("get_column", ops::select::get_column as OpFn);
    ops.insert("get_cell", ops::select::get_cell as OpFn);
    ops.insert("sort", ops::select::sort as OpFn);
    ops.insert("sample", ops::select::sample as OpFn);
    ops.insert("cast", ops::select::cast as OpFn);
    ops.insert("filter", ops::select::filter as OpFn);
    ops.insert("group_agg", ops::select::group_agg as OpFn);

    // encoding / scaling
    ops.insert("one_hot", ops::encode::one_hot as OpFn);
    ops.insert("scale_numeric", ops::encode::scale_numeric as OpFn);
    ops.insert(
        "merge_rare_categories",
        ops::encode::merge_rare_categories as OpFn,
    );

    // aliases kept for documents written against older revisions
    ops.insert("drop_nulls", ops::clean::drop_nans as OpFn);
    ops.insert("join", ops::combine::merge as OpFn);
    ops.insert("at", ops::select::get_cell as OpFn);

    ops
});

pub struct Registry;

impl Registry {
    /// Exact-name lookup
    pub fn get(name: &str) -> Option<OpFn> {
        REGISTRY.get(name).copied()
    }

    pub fn contains(name: &str) -> bool {
        REGISTRY.contains_key(name)
    }

    /// Registered names, sorted for stable listings
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
