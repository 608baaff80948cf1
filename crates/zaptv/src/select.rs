use crate::{error::ZapResult, playlist::Channel};

/// Boundary to the interactive channel picker.
///
/// Implementations present `channels` in their given order, labeling each
/// entry with `label`, and resolve to the index of the chosen entry.
/// `Ok(None)` means the user backed out without choosing; callers treat
/// cancellation like any other abort.
pub trait ChannelSelector {
    fn select<F>(&mut self, channels: &[Channel], label: F) -> ZapResult<Option<usize>>
    where
        F: Fn(&Channel) -> String;
}
