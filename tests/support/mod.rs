// tests/support/mod.rs

//! Helpers for decoding recorded expander frames back into the logical
//! byte stream the driver sent.

use lcd_term::lcd::pins::PinMap;

/// The standard backpack wiring used across the integration tests.
pub fn pins() -> PinMap {
    PinMap::new(2, 1, 0, 4, 5, 6, 7, 3).unwrap()
}

/// One decoded wire event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEvent {
    /// A strobed nibble: the payload nibble and the register-select level.
    Nibble { nibble: u8, data: bool },
    /// A bare frame outside any strobe (backlight toggles).
    Bare(u8),
}

/// Splits a frame recording into strobes and bare frames.
///
/// A strobe is the triple `frame, frame | enable, frame`; anything that does
/// not match is a standalone frame.
pub fn parse_events(frames: &[u8], pins: &PinMap) -> Vec<WireEvent> {
    let enable = 1 << pins.enable;
    let mut events = Vec::new();
    let mut i = 0;
    while i < frames.len() {
        if i + 2 < frames.len()
            && frames[i + 1] == frames[i] | enable
            && frames[i + 2] == frames[i]
        {
            events.push(WireEvent::Nibble {
                nibble: decode_nibble(frames[i], pins),
                data: frames[i] & (1 << pins.register_select) != 0,
            });
            i += 3;
        } else {
            events.push(WireEvent::Bare(frames[i]));
            i += 1;
        }
    }
    events
}

/// Reassembles full bytes from nibble pairs, dropping bare frames.
/// Returns `(byte, is_data)` per transfer.
pub fn sent_bytes(frames: &[u8], pins: &PinMap) -> Vec<(u8, bool)> {
    let nibbles: Vec<(u8, bool)> = parse_events(frames, pins)
        .into_iter()
        .filter_map(|event| match event {
            WireEvent::Nibble { nibble, data } => Some((nibble, data)),
            WireEvent::Bare(_) => None,
        })
        .collect();
    nibbles
        .chunks(2)
        .filter(|pair| pair.len() == 2)
        .map(|pair| ((pair[0].0 << 4) | pair[1].0, pair[0].1))
        .collect()
}

fn decode_nibble(frame: u8, pins: &PinMap) -> u8 {
    let mut nibble = 0u8;
    for (bit, &pin) in pins.data.iter().enumerate() {
        if frame & (1 << pin) != 0 {
            nibble |= 1 << bit;
        }
    }
    nibble
}
