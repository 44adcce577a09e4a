//! Code-unit enumeration.

use std::iter::FusedIterator;

use crate::enumerator::TextEnumerator;
use crate::view::TextView;
use crate::ViewResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    NotStarted,
    Active(usize),
    Exhausted,
}

/// Enumerates the code units of a view in order.
///
/// The only restartable enumerator: [`TextEnumerator::reset`] rewinds it to
/// before the first unit.
#[derive(Debug, Clone)]
pub struct CodeUnits<'a> {
    view: TextView<'a>,
    state: CursorState,
}

impl<'a> CodeUnits<'a> {
    pub(crate) fn new(view: TextView<'a>) -> Self {
        Self {
            view,
            state: CursorState::NotStarted,
        }
    }

    /// Index of the current unit within the view.
    pub fn position(&self) -> Option<usize> {
        match self.state {
            CursorState::Active(index) => Some(index),
            _ => None,
        }
    }

    fn remaining(&self) -> usize {
        match self.state {
            CursorState::NotStarted => self.view.len(),
            CursorState::Active(index) => self.view.len() - index - 1,
            CursorState::Exhausted => 0,
        }
    }
}

impl TextEnumerator for CodeUnits<'_> {
    type Element = u16;

    fn advance(&mut self) -> bool {
        let next = match self.state {
            CursorState::NotStarted => 0,
            CursorState::Active(index) => index + 1,
            CursorState::Exhausted => return false,
        };
        if next >= self.view.len() {
            self.state = CursorState::Exhausted;
            return false;
        }
        self.state = CursorState::Active(next);
        true
    }

    fn current(&self) -> Option<u16> {
        self.position().and_then(|index| self.view.get(index))
    }

    fn reset(&mut self) -> ViewResult<()> {
        self.state = CursorState::NotStarted;
        Ok(())
    }
}

impl Iterator for CodeUnits<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.advance() { self.current() } else { None }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CodeUnits<'_> {}

impl FusedIterator for CodeUnits<'_> {}
