use fake::{Dummy, Fake, Faker};

use crate::DataError;

use super::DataView;

/// Container of randomly generated items, useful for writing tests.
pub struct FakeDataset<I> {
    items: Vec<I>,
}

impl<I: Dummy<Faker>> FakeDataset<I> {
    /// Creates a new fake dataset with the given number of generated items.
    pub fn new(size: usize) -> Self {
        let items = (0..size).map(|_| Faker.fake()).collect();

        Self { items }
    }
}

impl<I> DataView<I> for FakeDataset<I>
where
    I: Clone + Send + Sync,
{
    fn numobs(&self) -> usize {
        self.items.len()
    }

    fn getobs(&self, index: usize) -> Result<I, DataError> {
        self.items.getobs(index)
    }
}
