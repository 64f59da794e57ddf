//! An in-memory implementation of the store traits.

use std::collections::BTreeMap;

use chihaya_error::{ChihayaResult, chihaya_err};

use crate::store::check_payload;
use crate::{Attribute, Dataset, Datatype, Group, Node, ObjectKind, Values};

/// A child of a [`MemGroup`].
#[derive(Debug, Clone, PartialEq)]
pub enum MemObject {
    /// A nested group.
    Group(MemGroup),
    /// A dataset.
    Dataset(MemDataset),
}

/// A group held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemGroup {
    attributes: BTreeMap<String, Attribute>,
    children: BTreeMap<String, MemObject>,
}

impl MemGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an attribute, replacing any existing one of the same name.
    pub fn with_attribute<S: Into<String>>(mut self, name: S, attribute: Attribute) -> Self {
        self.set_attribute(name, attribute);
        self
    }

    /// Attach a nested group, replacing any existing child of the same name.
    pub fn with_group<S: Into<String>>(mut self, name: S, group: MemGroup) -> Self {
        self.children.insert(name.into(), MemObject::Group(group));
        self
    }

    /// Attach a dataset, replacing any existing child of the same name.
    pub fn with_dataset<S: Into<String>>(mut self, name: S, dataset: MemDataset) -> Self {
        self.children.insert(name.into(), MemObject::Dataset(dataset));
        self
    }

    /// Attach an attribute in place.
    pub fn set_attribute<S: Into<String>>(&mut self, name: S, attribute: Attribute) {
        self.attributes.insert(name.into(), attribute);
    }

    /// Remove an attribute, returning it if it existed.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }

    /// Insert a child in place, returning the child it replaced.
    pub fn insert<S: Into<String>>(&mut self, name: S, child: MemObject) -> Option<MemObject> {
        self.children.insert(name.into(), child)
    }

    /// Remove a child, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<MemObject> {
        self.children.remove(name)
    }

    /// Mutable access to a nested group.
    pub fn group_mut(&mut self, name: &str) -> Option<&mut MemGroup> {
        match self.children.get_mut(name) {
            Some(MemObject::Group(group)) => Some(group),
            _ => None,
        }
    }

    /// Mutable access to a dataset.
    pub fn dataset_mut(&mut self, name: &str) -> Option<&mut MemDataset> {
        match self.children.get_mut(name) {
            Some(MemObject::Dataset(dataset)) => Some(dataset),
            _ => None,
        }
    }
}

impl Node for MemGroup {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes.get(name).cloned()
    }
}

impl Group for MemGroup {
    fn child_kind(&self, name: &str) -> Option<ObjectKind> {
        self.children.get(name).map(|child| match child {
            MemObject::Group(_) => ObjectKind::Group,
            MemObject::Dataset(_) => ObjectKind::Dataset,
        })
    }

    fn children(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    fn open_group(&self, name: &str) -> ChihayaResult<Box<dyn Group + '_>> {
        match self.children.get(name) {
            Some(MemObject::Group(group)) => Ok(Box::new(group)),
            Some(MemObject::Dataset(_)) => Err(chihaya_err!("'{}' is a dataset, not a group", name)),
            None => Err(chihaya_err!("no object named '{}'", name)),
        }
    }

    fn open_dataset(&self, name: &str) -> ChihayaResult<Box<dyn Dataset + '_>> {
        match self.children.get(name) {
            Some(MemObject::Dataset(dataset)) => Ok(Box::new(dataset)),
            Some(MemObject::Group(_)) => Err(chihaya_err!("'{}' is a group, not a dataset", name)),
            None => Err(chihaya_err!("no object named '{}'", name)),
        }
    }
}

/// A dataset held entirely in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemDataset {
    datatype: Datatype,
    shape: Vec<u64>,
    values: Values,
    attributes: BTreeMap<String, Attribute>,
}

impl MemDataset {
    /// Create a dataset. The number of values must match the shape.
    pub fn try_new(datatype: Datatype, shape: Vec<u64>, values: Values) -> ChihayaResult<Self> {
        check_payload(&datatype, &shape, &values)?;
        Ok(Self {
            datatype,
            shape,
            values,
            attributes: BTreeMap::new(),
        })
    }

    /// A signed integer dataset.
    pub fn int(datatype: Datatype, shape: Vec<u64>, values: Vec<i64>) -> ChihayaResult<Self> {
        Self::try_new(datatype, shape, Values::Int(values))
    }

    /// An unsigned integer dataset.
    pub fn uint(datatype: Datatype, shape: Vec<u64>, values: Vec<u64>) -> ChihayaResult<Self> {
        Self::try_new(datatype, shape, Values::UInt(values))
    }

    /// A float dataset.
    pub fn float(datatype: Datatype, shape: Vec<u64>, values: Vec<f64>) -> ChihayaResult<Self> {
        Self::try_new(datatype, shape, Values::Float(values))
    }

    /// A string dataset, where `None` entries are null strings.
    pub fn strings(shape: Vec<u64>, values: Vec<Option<String>>) -> ChihayaResult<Self> {
        Self::try_new(Datatype::String, shape, Values::Str(values))
    }

    /// A scalar string dataset.
    pub fn scalar_string<S: Into<String>>(value: S) -> Self {
        Self {
            datatype: Datatype::String,
            shape: Vec::new(),
            values: Values::Str(vec![Some(value.into())]),
            attributes: BTreeMap::new(),
        }
    }

    /// A 1-dimensional string dataset without nulls.
    pub fn string_vector<S: Into<String>, I: IntoIterator<Item = S>>(values: I) -> Self {
        let values: Vec<Option<String>> = values.into_iter().map(|v| Some(v.into())).collect();
        Self {
            datatype: Datatype::String,
            shape: vec![values.len() as u64],
            values: Values::Str(values),
            attributes: BTreeMap::new(),
        }
    }

    /// Attach an attribute, replacing any existing one of the same name.
    pub fn with_attribute<S: Into<String>>(mut self, name: S, attribute: Attribute) -> Self {
        self.set_attribute(name, attribute);
        self
    }

    /// Attach an attribute in place.
    pub fn set_attribute<S: Into<String>>(&mut self, name: S, attribute: Attribute) {
        self.attributes.insert(name.into(), attribute);
    }

    /// Remove an attribute, returning it if it existed.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }
}

impl Node for MemDataset {
    fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes.get(name).cloned()
    }
}

impl Dataset for MemDataset {
    fn datatype(&self) -> Datatype {
        self.datatype
    }

    fn shape(&self) -> Vec<u64> {
        self.shape.clone()
    }

    fn read(&self, start: u64, count: usize) -> ChihayaResult<Values> {
        let len = self.values.len() as u64;
        let start = usize::try_from(start)
            .map_err(|_| chihaya_err!(OutOfBounds: start, 0, len))?;
        self.values.slice(start, count)
    }
}
