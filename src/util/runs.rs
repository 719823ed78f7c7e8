pub trait RunIterator: Iterator {
    /// Groups consecutive items into runs.
    ///
    /// `same_run(last, next)` decides whether `next` continues the run that
    /// currently ends with `last`.
    fn runs<F>(self, same_run: F) -> Runs<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item, &Self::Item) -> bool,
    {
        Runs::new(self, same_run)
    }
}

impl<T: Sized> RunIterator for T where T: Iterator {}

/// A maximal sequence of consecutive items, given by its first and last item.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Run<T> {
    pub first: T,
    pub last: T,
    pub len: usize,
}

pub struct Runs<T, F>
where
    T: Iterator,
{
    it: T,
    same_run: F,
    next_item: Option<T::Item>,
}

impl<T, F> Runs<T, F>
where
    T: Iterator,
{
    pub fn new(mut it: T, same_run: F) -> Self {
        let next_item = it.next();
        Self {
            it,
            same_run,
            next_item,
        }
    }
}

impl<T, F> Iterator for Runs<T, F>
where
    T: Iterator,
    T::Item: Clone,
    F: FnMut(&T::Item, &T::Item) -> bool,
{
    type Item = Run<T::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.next_item.take()?;

        let mut last = first.clone();
        let mut len = 1;
        for item in &mut self.it {
            if (self.same_run)(&last, &item) {
                last = item;
                len += 1;
            } else {
                self.next_item = Some(item);
                break;
            }
        }

        Some(Run { first, last, len })
    }
}
