/// Reports a broken internal invariant of the tree and panics.
///
/// Reaching this is a bug in the crate, never a consequence of caller input, so there is nothing
/// to recover: the message is logged and the thread panics.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn invariant_violation(msg: &str) -> ! {
    log::error!("quadtree invariant violated: {}", msg);
    unreachable!("quadtree invariant violated: {}", msg)
}
