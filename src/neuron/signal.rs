use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A scalar slot with exactly one writer.
///
/// The owner (a neuron's output, or one network input) writes through the
/// `Signal`; any number of consumers observe the live value through
/// [`SignalReader`] handles. Readers never hold a copy of the value.
#[derive(Default)]
pub struct Signal(Rc<Cell<f64>>);

/// Read-only view onto a [`Signal`].
#[derive(Clone)]
pub struct SignalReader(Rc<Cell<f64>>);

impl Signal {
    pub fn new(value: f64) -> Signal {
        Signal(Rc::new(Cell::new(value)))
    }

    pub fn set(&self, value: f64) {
        self.0.set(value);
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn reader(&self) -> SignalReader {
        SignalReader(Rc::clone(&self.0))
    }
}

impl SignalReader {
    pub fn get(&self) -> f64 {
        self.0.get()
    }

    /// True when both handles observe the same slot.
    pub fn same_source(&self, other: &SignalReader) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&self.get()).finish()
    }
}

impl fmt::Debug for SignalReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignalReader").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers_see_writes_after_they_were_taken() {
        let signal = Signal::new(1.0);
        let a = signal.reader();
        let b = a.clone();
        signal.set(-3.0);
        assert_eq!(a.get(), -3.0);
        assert_eq!(b.get(), -3.0);
        assert!(a.same_source(&b));
        assert!(!a.same_source(&Signal::default().reader()));
    }
}
