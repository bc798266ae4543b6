//! Proposal screen buttons: the "no" button runs away, "yes" grows

use crate::consts::{NO_OFFSET_STEP, YES_SCALE_MAX, YES_SCALE_STEP};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposalButtons {
    pub yes_scale: f32,
    /// How far left the no button has been pushed (px)
    pub no_offset_px: f32,
    pub dodges: u32,
}

impl Default for ProposalButtons {
    fn default() -> Self {
        Self {
            yes_scale: 1.0,
            no_offset_px: 0.0,
            dodges: 0,
        }
    }
}

impl ProposalButtons {
    /// Register a "no" press
    pub fn dodge(&mut self) {
        self.yes_scale = (self.yes_scale + YES_SCALE_STEP).min(YES_SCALE_MAX);
        self.no_offset_px += NO_OFFSET_STEP;
        self.dodges += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dodge_grows_yes_until_cap() {
        let mut buttons = ProposalButtons::default();
        buttons.dodge();
        assert!((buttons.yes_scale - 1.22).abs() < 1e-5);
        assert_eq!(buttons.no_offset_px, 12.0);

        for _ in 0..50 {
            buttons.dodge();
        }
        assert_eq!(buttons.yes_scale, YES_SCALE_MAX);
        assert_eq!(buttons.no_offset_px, 12.0 * 51.0);
        assert_eq!(buttons.dodges, 51);
    }
}
