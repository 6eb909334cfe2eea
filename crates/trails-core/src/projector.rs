use crate::engine::Phase;
use crate::record::TokenRecord;

/// A token to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleToken<'a> {
    pub record: &'a TokenRecord,
    /// True for the output token whose arrow is currently growing.
    pub in_flight: bool,
}

/// Tokens visible at `step`/`phase`: every input, the outputs already
/// revealed, and while growing the output currently being revealed.
///
/// Derived on demand; holds no state of its own.
pub fn visible_tokens<'a>(
    inputs: &'a [TokenRecord],
    outputs: &'a [TokenRecord],
    step: usize,
    phase: Phase,
) -> Vec<VisibleToken<'a>> {
    let revealed = step.min(outputs.len());
    let mut visible = Vec::with_capacity(inputs.len() + revealed + 1);
    visible.extend(inputs.iter().map(|record| VisibleToken {
        record,
        in_flight: false,
    }));
    visible.extend(outputs[..revealed].iter().map(|record| VisibleToken {
        record,
        in_flight: false,
    }));
    if phase == Phase::Growing {
        if let Some(record) = outputs.get(step) {
            visible.push(VisibleToken {
                record,
                in_flight: true,
            });
        }
    }
    visible
}
