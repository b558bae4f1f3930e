//! Resolved experiment configuration
//!
//! Turns the raw [`Args`] into an [`ExperimentConfig`]: list options are
//! parsed, cross-option rules are checked and every `--method` descriptor
//! becomes an owned [`ParameterSet`] in a [`MethodMap`].

use crate::args::Args;
use crate::error::{CliError, Result};
use serde::{Serialize, Serializer};
use simbench_core::{ParamValue, ParameterSet};
use std::collections::BTreeMap;
use tracing::debug;

/// Method name to parameter sets, one set per requested method instance.
///
/// Names are kept sorted; repeated names keep the order they were given in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodMap {
    methods: BTreeMap<String, Vec<ParameterSet>>,
}

impl MethodMap {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, params: ParameterSet) {
        self.methods.entry(name.into()).or_default().push(params);
    }

    /// All parameter sets given for `name`
    pub fn get(&self, name: &str) -> &[ParameterSet] {
        self.methods.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of method instances
    pub fn len(&self) -> usize {
        self.methods.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterSet)> {
        self.methods
            .iter()
            .flat_map(|(name, sets)| sets.iter().map(move |params| (name.as_str(), params)))
    }
}

impl IntoIterator for MethodMap {
    type Item = (String, ParameterSet);
    type IntoIter = std::vec::IntoIter<(String, ParameterSet)>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods
            .into_iter()
            .flat_map(|(name, sets)| sets.into_iter().map(move |params| (name.clone(), params)))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

// Sets are written in descriptor form, e.g. {"vptree": ["alphaLeft=2,bucketSize=50"]}.
impl Serialize for MethodMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.methods.iter().map(|(name, sets)| {
            (name, sets.iter().map(ToString::to_string).collect::<Vec<_>>())
        }))
    }
}

/// Everything the benchmark driver needs to run one experiment.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentConfig {
    pub dist_type: String,
    pub space_type: String,
    pub dimension: u32,
    pub thread_test_qty: u32,
    pub append_to_res_file: bool,
    pub res_file_prefix: String,
    pub test_set_qty: u32,
    pub data_file: String,
    pub query_file: String,
    pub max_num_data: u32,
    pub max_num_query: u32,
    pub knn: Vec<u32>,
    pub eps: f32,
    /// Range search specification as given, see [`ExperimentConfig::range_radii`]
    pub range: String,
    pub methods: MethodMap,
}

impl ExperimentConfig {
    /// Radii of the range search, empty when no range search was requested.
    pub fn range_radii(&self) -> Result<Vec<f64>> {
        parse_list("range", &self.range)
    }
}

impl TryFrom<Args> for ExperimentConfig {
    type Error = CliError;

    fn try_from(args: Args) -> Result<Self> {
        if args.data_file.is_empty() {
            return Err(CliError::MissingDataFile);
        }
        match (args.query_file.is_empty(), args.test_set_qty) {
            (true, 0) => return Err(CliError::MissingQueries),
            (false, qty) if qty > 0 => return Err(CliError::ConflictingQueries),
            _ => {}
        }

        let knn = parse_list::<u32>("knn", &args.knn)?;
        parse_list::<f64>("range", &args.range)?;
        if knn.is_empty() && args.range.is_empty() {
            return Err(CliError::NoSearchType);
        }

        if args.methods.is_empty() {
            return Err(CliError::NoMethods);
        }
        let mut methods = MethodMap::new();
        for desc in &args.methods {
            let (name, params) = parse_method(desc)?;
            debug!("Method {}: {}", name, params);
            methods.insert(name, params);
        }

        Ok(Self {
            dist_type: args.dist_type,
            space_type: args.space_type,
            dimension: args.dimension,
            thread_test_qty: args.thread_test_qty,
            append_to_res_file: args.append_to_res_file,
            res_file_prefix: args.out_file_prefix,
            test_set_qty: args.test_set_qty,
            data_file: args.data_file,
            query_file: args.query_file,
            max_num_data: args.max_num_data,
            max_num_query: args.max_num_query,
            knn,
            eps: args.eps,
            range: args.range,
            methods,
        })
    }
}

/// Split `<MethodName>[:<Name1>=<Value1>,...]` into the method name and its parameters.
pub fn parse_method(desc: &str) -> Result<(String, ParameterSet)> {
    let (name, tail) = desc.split_once(':').unwrap_or((desc, ""));
    if name.is_empty() {
        return Err(CliError::MalformedMethod(desc.to_string()));
    }

    let params = if tail.is_empty() {
        ParameterSet::new()
    } else {
        ParameterSet::from_tokens(tail.split(','))?
    };
    Ok((name.to_string(), params))
}

/// Parse a comma-separated option value with the parameter conversion rules.
fn parse_list<T: ParamValue>(option: &'static str, text: &str) -> Result<Vec<T>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|item| {
            T::parse_param(item).ok_or_else(|| CliError::InvalidList {
                option,
                value: item.to_string(),
            })
        })
        .collect()
}
