//! VIS calibration header
//!
//! [Vis codes][1]
//!
//! [1]: https://web.archive.org/web/20050306193820/http://www.tima.com/~djones/vis.txt

use std::{
    fmt::{
        self,
        Display,
    },
    str::FromStr,
};

use crate::modem::sstv::{
    CALIBRATION_TIME,
    EmitPulse,
    LEADER_BREAK_TIME,
    LEADER_TIME,
    LEADER_TONE,
    PORCH_TONE,
    Pulse,
    SYNC_TONE,
    VIS_BIT_TIME,
    VIS_HIGH_TONE,
    VIS_LOW_TONE,
};

/// Quick-identification tones preceding the VIS break.
pub const CALIBRATION_TONES: [Pulse; 8] = [
    Pulse::new(LEADER_TONE, CALIBRATION_TIME),
    Pulse::new(PORCH_TONE, CALIBRATION_TIME),
    Pulse::new(LEADER_TONE, CALIBRATION_TIME),
    Pulse::new(PORCH_TONE, CALIBRATION_TIME),
    Pulse::new(2300.0, CALIBRATION_TIME),
    Pulse::new(PORCH_TONE, CALIBRATION_TIME),
    Pulse::new(2300.0, CALIBRATION_TIME),
    Pulse::new(PORCH_TONE, CALIBRATION_TIME),
];

/// Leader, break, leader and start bit.
pub const VIS_BREAK: [Pulse; 4] = [
    Pulse::new(LEADER_TONE, LEADER_TIME),
    Pulse::new(SYNC_TONE, LEADER_BREAK_TIME),
    Pulse::new(LEADER_TONE, LEADER_TIME),
    Pulse::new(SYNC_TONE, VIS_BIT_TIME),
];

pub const VIS_STOP: Pulse = Pulse::new(SYNC_TONE, VIS_BIT_TIME);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct VisCode(u8);

impl VisCode {
    /// `value` must fit in 7 bits.
    #[inline]
    pub const fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get_bit(&self, bit: u8) -> bool {
        assert!(bit < 7);
        (self.0 >> bit) & 1 != 0
    }

    /// Even parity bit: set if the code has an odd number of ones.
    #[inline]
    pub fn parity(&self) -> bool {
        self.0.count_ones() % 2 != 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid VIS code: {input:?} (expected 7 binary digits, MSB first)")]
pub struct ParseVisCodeError {
    pub input: String,
}

impl FromStr for VisCode {
    type Err = ParseVisCodeError;

    /// Parses the usual written form, e.g. `1001100` for Scottie DX.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || {
            ParseVisCodeError {
                input: s.to_owned(),
            }
        };
        if s.len() != 7 {
            return Err(error());
        }
        s.chars().try_fold(VisCode(0), |code, c| {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(error()),
            };
            Ok(VisCode((code.0 << 1) | bit))
        })
    }
}

impl Display for VisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07b}", self.0)
    }
}

#[inline]
fn bit_pulse(bit: bool) -> Pulse {
    Pulse::new(
        if bit { VIS_HIGH_TONE } else { VIS_LOW_TONE },
        VIS_BIT_TIME,
    )
}

/// Pulses of the calibration header for `code`, in transmission order.
pub fn vis_pulses(code: VisCode) -> impl Iterator<Item = Pulse> {
    // data bits go out LSB first
    let data = (0..7).map(move |bit| bit_pulse(code.get_bit(bit)));

    CALIBRATION_TONES
        .into_iter()
        .chain(VIS_BREAK)
        .chain(data)
        .chain([bit_pulse(code.parity()), VIS_STOP])
}

pub fn encode_vis<E>(code: VisCode, emitter: &mut E) -> Result<(), E::Error>
where
    E: EmitPulse,
{
    emitter.emit_all(vis_pulses(code))
}
