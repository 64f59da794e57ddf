use chihaya_error::{ChihayaResult, chihaya_bail, chihaya_err};

use crate::{Dataset, Values};

/// Default number of elements held in memory by a [`DatasetStream`].
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

/// An element type that can be extracted from a block of stored [`Values`].
pub trait StreamElement: Sized {
    /// Convert a block of values, failing if any of them cannot be represented.
    fn from_values(values: Values) -> ChihayaResult<Vec<Self>>;
}

impl StreamElement for u64 {
    fn from_values(values: Values) -> ChihayaResult<Vec<Self>> {
        match values {
            Values::UInt(v) => Ok(v),
            Values::Int(v) => v
                .into_iter()
                .map(|x| {
                    u64::try_from(x).map_err(|_| {
                        chihaya_err!(Unsupported: "expected non-negative values, got {}", x)
                    })
                })
                .collect(),
            _ => chihaya_bail!(Unsupported: "expected integer values"),
        }
    }
}

impl StreamElement for i64 {
    fn from_values(values: Values) -> ChihayaResult<Vec<Self>> {
        match values {
            Values::Int(v) => Ok(v),
            Values::UInt(v) => v
                .into_iter()
                .map(|x| {
                    i64::try_from(x).map_err(|_| {
                        chihaya_err!(
                            Unsupported: "value {} does not fit in a signed 64-bit integer",
                            x
                        )
                    })
                })
                .collect(),
            _ => chihaya_bail!(Unsupported: "expected integer values"),
        }
    }
}

impl StreamElement for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_values(values: Values) -> ChihayaResult<Vec<Self>> {
        match values {
            Values::Float(v) => Ok(v),
            Values::Int(v) => Ok(v.into_iter().map(|x| x as f64).collect()),
            Values::UInt(v) => Ok(v.into_iter().map(|x| x as f64).collect()),
            Values::Str(_) => chihaya_bail!(Unsupported: "expected numeric values"),
        }
    }
}

impl StreamElement for Option<String> {
    fn from_values(values: Values) -> ChihayaResult<Vec<Self>> {
        match values {
            Values::Str(v) => Ok(v),
            _ => chihaya_bail!(Unsupported: "expected string values"),
        }
    }
}

/// Iterates over every element of a dataset in row-major order, holding at most `buffer_size`
/// elements in memory at a time.
pub struct DatasetStream<'a, T> {
    dataset: &'a dyn Dataset,
    total: u64,
    consumed: u64,
    buffer_size: usize,
    block: std::vec::IntoIter<T>,
}

impl<'a, T: StreamElement> DatasetStream<'a, T> {
    /// Stream over all elements of `dataset`, failing if its element count overflows.
    pub fn new(dataset: &'a dyn Dataset, buffer_size: usize) -> ChihayaResult<Self> {
        Ok(Self {
            dataset,
            total: dataset.num_elements()?,
            consumed: 0,
            buffer_size: buffer_size.max(1),
            block: Vec::new().into_iter(),
        })
    }

    /// Total number of elements that the stream will yield.
    pub fn total(&self) -> u64 {
        self.total
    }

    fn fill(&mut self) -> ChihayaResult<()> {
        let remaining = self.total - self.consumed;
        let count =
            usize::try_from(remaining).map_or(self.buffer_size, |r| r.min(self.buffer_size));
        log::trace!(
            "reading block of {} elements at offset {}",
            count,
            self.consumed
        );
        let values = self.dataset.read(self.consumed, count)?;
        if values.len() != count {
            chihaya_bail!(Unsupported: "expected a block of {} values, got {}", count, values.len());
        }
        self.block = T::from_values(values)?.into_iter();
        self.consumed += count as u64;
        Ok(())
    }
}

impl<T: StreamElement> Iterator for DatasetStream<'_, T> {
    type Item = ChihayaResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(next) = self.block.next() {
            return Some(Ok(next));
        }
        if self.consumed >= self.total {
            return None;
        }
        if let Err(e) = self.fill() {
            // Nothing sensible can follow a failed read.
            self.consumed = self.total;
            return Some(Err(e));
        }
        self.block.next().map(Ok)
    }
}
