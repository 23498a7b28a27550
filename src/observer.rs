//! Notification hooks for a rendering collaborator.

use crate::board::{Board, Placement};

/// Receives snapshots of the search as it runs.
///
/// Every method has an empty default, so implementors only override what they
/// display. Notifications are fire-and-forget: the search continues as soon
/// as a method returns and never inspects its outcome.
pub trait Observer {
    /// Called after `placement` was laid on the board.
    fn placed(&mut self, _board: &Board, _placement: &Placement) {}

    /// Called after `placement` was taken back off the board.
    fn removed(&mut self, _board: &Board, _placement: &Placement) {}

    /// Called once when the search ends. `board` holds the tiling if `solved`
    /// is true.
    fn finished(&mut self, _board: &Board, _solved: bool) {}
}

/// Observer that ignores every notification.
impl Observer for () {}

impl<O> Observer for &mut O
where
    O: Observer + ?Sized,
{
    fn placed(&mut self, board: &Board, placement: &Placement) {
        <O as Observer>::placed(self, board, placement)
    }

    fn removed(&mut self, board: &Board, placement: &Placement) {
        <O as Observer>::removed(self, board, placement)
    }

    fn finished(&mut self, board: &Board, solved: bool) {
        <O as Observer>::finished(self, board, solved)
    }
}
