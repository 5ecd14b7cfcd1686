use crate::types::{Operation, SequenceError};
use heapless::Vec;

/// Maximum number of operations in a sequence, including the trailing
/// [`Operation::End`].
pub const SEQUENCE_CAPACITY: usize = 1000;

/// A compiled, bounded list of pin operations.
///
/// Always terminated by exactly one [`Operation::End`], which is the last
/// element. A sequence is *static* when it contains no pause; the player then
/// loops it as fast as the scheduler allows.
///
/// Sequences are never modified after [`SequenceBuilder::build`]; replacing
/// the running pattern means publishing a whole new sequence through the
/// [`PatternBuffer`](crate::PatternBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSequence {
    operations: Vec<Operation, SEQUENCE_CAPACITY>,
    is_static: bool,
}

impl OperationSequence {
    /// Creates a new sequence builder.
    pub fn builder() -> SequenceBuilder {
        SequenceBuilder::new()
    }

    /// The idle sequence: a lone `End` that drives no pins.
    pub fn idle() -> Self {
        let mut operations = Vec::new();
        // Capacity is far above one.
        let _ = operations.push(Operation::End);
        Self {
            operations,
            is_static: true,
        }
    }

    /// Returns the operation at `index`, or `End` past the terminator.
    #[inline]
    pub fn get(&self, index: usize) -> Operation {
        self.operations.get(index).copied().unwrap_or(Operation::End)
    }

    /// Number of operations including the trailing `End`.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true for the idle sequence.
    pub fn is_empty(&self) -> bool {
        self.operations.len() <= 1
    }

    /// Returns true if the sequence contains no pause.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// All operations including the trailing `End`.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

impl Default for OperationSequence {
    fn default() -> Self {
        Self::idle()
    }
}

/// Builder for constructing bounded operation sequences.
///
/// Reserves one slot for the terminating `End`, so a builder accepts at most
/// `SEQUENCE_CAPACITY - 1` pushes.
#[derive(Debug)]
pub struct SequenceBuilder {
    operations: Vec<Operation, SEQUENCE_CAPACITY>,
    is_static: bool,
}

impl SequenceBuilder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
            is_static: true,
        }
    }

    /// Appends an operation.
    ///
    /// `End` is appended by [`build`](Self::build) and is ignored here.
    ///
    /// # Errors
    /// * `CapacityExceeded` - No room left for this operation and the terminator
    pub fn push(&mut self, operation: Operation) -> Result<(), SequenceError> {
        if operation == Operation::End {
            return Ok(());
        }
        if self.operations.len() + 1 >= SEQUENCE_CAPACITY {
            return Err(SequenceError::CapacityExceeded);
        }
        if operation.is_pause() {
            self.is_static = false;
        }
        self.operations
            .push(operation)
            .map_err(|_| SequenceError::CapacityExceeded)
    }

    /// Number of operations pushed so far.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Terminates the sequence with `End`.
    pub fn build(mut self) -> OperationSequence {
        // `push` always leaves a slot free for the terminator.
        let _ = self.operations.push(Operation::End);
        OperationSequence {
            operations: self.operations,
            is_static: self.is_static,
        }
    }
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
