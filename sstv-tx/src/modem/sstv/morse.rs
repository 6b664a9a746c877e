//! CW station identification sent ahead of the VIS header.

use std::{
    fmt::{
        self,
        Display,
    },
    str::FromStr,
};

use crate::modem::sstv::{
    EmitPulse,
    LEADER_TONE,
    Pulse,
};

pub const CW_TONE: f64 = LEADER_TONE;
pub const DOT_TIME: f64 = 50.0;
pub const DASH_TIME: f64 = 150.0;
pub const ELEMENT_GAP_TIME: f64 = 50.0;
pub const LETTER_GAP_TIME: f64 = 150.0;
pub const WORD_GAP_TIME: f64 = 350.0;

fn morse_code(c: char) -> Option<&'static str> {
    let code = match c.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '/' => "-..-.",
        _ => return None,
    };
    Some(code)
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("character {character:?} can't be sent as morse code")]
pub struct InvalidCallSign {
    pub character: char,
}

/// Text to key as morse code, e.g. `DE BG7ZDQ`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSign {
    words: Vec<String>,
}

impl CallSign {
    /// Keyed pulses: tones at [`CW_TONE`] separated by silence.
    pub fn pulses(&self) -> Vec<Pulse> {
        let mut pulses = vec![];

        for word in &self.words {
            let mut letters = word.chars().peekable();
            while let Some(letter) = letters.next() {
                // validated on construction
                let Some(code) = morse_code(letter)
                else {
                    continue;
                };

                let mut elements = code.chars().peekable();
                while let Some(element) = elements.next() {
                    let duration = if element == '-' { DASH_TIME } else { DOT_TIME };
                    pulses.push(Pulse::new(CW_TONE, duration));

                    let gap = if elements.peek().is_some() {
                        ELEMENT_GAP_TIME
                    }
                    else if letters.peek().is_some() {
                        LETTER_GAP_TIME
                    }
                    else {
                        WORD_GAP_TIME
                    };
                    pulses.push(Pulse::silence(gap));
                }
            }
        }

        pulses
    }

    pub fn encode<E>(&self, emitter: &mut E) -> Result<(), E::Error>
    where
        E: EmitPulse,
    {
        emitter.emit_all(self.pulses())
    }
}

impl FromStr for CallSign {
    type Err = InvalidCallSign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words = s
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .map(|character| {
                        morse_code(character)
                            .map(|_| character.to_ascii_uppercase())
                            .ok_or(InvalidCallSign { character })
                    })
                    .collect::<Result<String, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { words })
    }
}

impl Display for CallSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}
