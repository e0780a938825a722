//! Windows Virtual Key (VK) tables: key names, extended keys, and scan codes.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h) and the IBM PC/AT
//! scan code set 1.
//!
//! # What is a Windows Virtual Key (VK) code? (for beginners)
//!
//! Windows assigns each keyboard key a number called a "Virtual Key code".
//! These are defined in `<winuser.h>` and named `VK_*` (e.g., `VK_RETURN = 0x0D`,
//! `VK_SPACE = 0x20`).  They are "virtual" because they represent *logical* keys
//! rather than physical scan codes: pressing the letter A on any keyboard layout
//! always produces `VK_A = 0x41`.  The *scan code* is the number the physical
//! key sends; `SendInput` wants both.
//!
//! # How these tables work
//!
//! `VK_TO_SCAN_TABLE` is a compile-time constant array of 256 scan codes,
//! indexed by VK code.  It stands in for `MapVirtualKeyW(vk, MAPVK_VK_TO_VSC)`
//! on machines where that call is unavailable.  Unmapped entries are `0`.
//!
//! `KEY_NAMES` maps the lowercase names used in `kb:` gesture identifiers to
//! VK codes and the extended-key flag that right-hand modifiers, navigation
//! and arrow keys need.  A few names share a VK code and differ only in the extended
//! flag (`enter` vs `numpadenter`).

/// Looks up the scan code for `vk` in the static set-1 table.
///
/// Returns `0` when the VK code has no entry.
pub fn vk_to_scan_code(vk: u8) -> u16 {
    VK_TO_SCAN_TABLE[vk as usize]
}

/// Looks up a `kb:` key name, ignoring case.
///
/// Returns the VK code and whether the key must be sent as extended.
pub fn key_name_to_vk(name: &str) -> Option<(u8, bool)> {
    let lower = name.to_ascii_lowercase();
    if let Some(&(_, vk, extended)) = KEY_NAMES.iter().find(|(n, _, _)| *n == lower) {
        return Some((vk, extended));
    }
    // Single letters and digits map straight onto their ASCII code.
    let mut chars = lower.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ 'a'..='z'), None) => Some((c.to_ascii_uppercase() as u8, false)),
        (Some(c @ '0'..='9'), None) => Some((c as u8, false)),
        _ => function_key(&lower),
    }
}

/// Parses `f1` … `f24`.
fn function_key(name: &str) -> Option<(u8, bool)> {
    let n: u8 = name.strip_prefix('f')?.parse().ok()?;
    (1..=24).contains(&n).then(|| (0x6F + n, false))
}

/// Named keys, lowercase, with VK code and extended flag.
const KEY_NAMES: &[(&str, u8, bool)] = &[
    // ── Modifiers ────────────────────────────────────────────────────────────
    ("shift", 0x10, false),
    ("leftshift", 0xA0, false),
    ("rightshift", 0xA1, false),
    ("control", 0x11, false),
    ("leftcontrol", 0xA2, false),
    ("rightcontrol", 0xA3, true),
    ("alt", 0x12, false),
    ("leftalt", 0xA4, false),
    ("rightalt", 0xA5, true),
    ("windows", 0x5B, true),
    ("leftwindows", 0x5B, true),
    ("rightwindows", 0x5C, true),
    // The screen reader modifier; Insert in the desktop layout.
    ("nvda", 0x2D, true),
    // ── Control keys ─────────────────────────────────────────────────────────
    ("enter", 0x0D, false),
    ("numpadenter", 0x0D, true),
    ("escape", 0x1B, false),
    ("backspace", 0x08, false),
    ("tab", 0x09, false),
    ("space", 0x20, false),
    ("capslock", 0x14, false),
    ("numlock", 0x90, true),
    ("scrolllock", 0x91, false),
    ("pause", 0x13, false),
    ("printscreen", 0x2C, true),
    ("applications", 0x5D, true),
    // ── Navigation ───────────────────────────────────────────────────────────
    ("insert", 0x2D, true),
    ("delete", 0x2E, true),
    ("home", 0x24, true),
    ("end", 0x23, true),
    ("pageup", 0x21, true),
    ("pagedown", 0x22, true),
    ("leftarrow", 0x25, true),
    ("uparrow", 0x26, true),
    ("rightarrow", 0x27, true),
    ("downarrow", 0x28, true),
    // ── Numpad ───────────────────────────────────────────────────────────────
    ("numpad0", 0x60, false),
    ("numpad1", 0x61, false),
    ("numpad2", 0x62, false),
    ("numpad3", 0x63, false),
    ("numpad4", 0x64, false),
    ("numpad5", 0x65, false),
    ("numpad6", 0x66, false),
    ("numpad7", 0x67, false),
    ("numpad8", 0x68, false),
    ("numpad9", 0x69, false),
    ("numpadmultiply", 0x6A, false),
    ("numpadplus", 0x6B, false),
    ("numpadminus", 0x6D, false),
    ("numpaddecimal", 0x6E, false),
    ("numpaddivide", 0x6F, true),
    // ── OEM punctuation (US layout) ──────────────────────────────────────────
    (";", 0xBA, false),
    ("=", 0xBB, false),
    (",", 0xBC, false),
    ("-", 0xBD, false),
    (".", 0xBE, false),
    ("/", 0xBF, false),
    ("`", 0xC0, false),
    ("[", 0xDB, false),
    ("\\", 0xDC, false),
    ("]", 0xDD, false),
    ("'", 0xDE, false),
];

/// VK → scan code set 1, indexed by VK code (0x00–0xFF).
const VK_TO_SCAN_TABLE: [u16; 256] = {
    let mut t = [0u16; 256];

    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    t[0x41] = 0x1E; // A
    t[0x42] = 0x30; // B
    t[0x43] = 0x2E; // C
    t[0x44] = 0x20; // D
    t[0x45] = 0x12; // E
    t[0x46] = 0x21; // F
    t[0x47] = 0x22; // G
    t[0x48] = 0x23; // H
    t[0x49] = 0x17; // I
    t[0x4A] = 0x24; // J
    t[0x4B] = 0x25; // K
    t[0x4C] = 0x26; // L
    t[0x4D] = 0x32; // M
    t[0x4E] = 0x31; // N
    t[0x4F] = 0x18; // O
    t[0x50] = 0x19; // P
    t[0x51] = 0x10; // Q
    t[0x52] = 0x13; // R
    t[0x53] = 0x1F; // S
    t[0x54] = 0x14; // T
    t[0x55] = 0x16; // U
    t[0x56] = 0x2F; // V
    t[0x57] = 0x11; // W
    t[0x58] = 0x2D; // X
    t[0x59] = 0x15; // Y
    t[0x5A] = 0x2C; // Z

    // ── Digit row (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────
    t[0x30] = 0x0B;
    t[0x31] = 0x02;
    t[0x32] = 0x03;
    t[0x33] = 0x04;
    t[0x34] = 0x05;
    t[0x35] = 0x06;
    t[0x36] = 0x07;
    t[0x37] = 0x08;
    t[0x38] = 0x09;
    t[0x39] = 0x0A;

    // ── Control keys ─────────────────────────────────────────────────────────
    t[0x08] = 0x0E; // VK_BACK
    t[0x09] = 0x0F; // VK_TAB
    t[0x0D] = 0x1C; // VK_RETURN
    t[0x10] = 0x2A; // VK_SHIFT
    t[0x11] = 0x1D; // VK_CONTROL
    t[0x12] = 0x38; // VK_MENU
    t[0x13] = 0x45; // VK_PAUSE
    t[0x14] = 0x3A; // VK_CAPITAL
    t[0x1B] = 0x01; // VK_ESCAPE
    t[0x20] = 0x39; // VK_SPACE
    t[0x2C] = 0x37; // VK_SNAPSHOT
    t[0x90] = 0x45; // VK_NUMLOCK
    t[0x91] = 0x46; // VK_SCROLL

    // ── Navigation (extended; same codes as the numpad) ──────────────────────
    t[0x21] = 0x49; // VK_PRIOR
    t[0x22] = 0x51; // VK_NEXT
    t[0x23] = 0x4F; // VK_END
    t[0x24] = 0x47; // VK_HOME
    t[0x25] = 0x4B; // VK_LEFT
    t[0x26] = 0x48; // VK_UP
    t[0x27] = 0x4D; // VK_RIGHT
    t[0x28] = 0x50; // VK_DOWN
    t[0x2D] = 0x52; // VK_INSERT
    t[0x2E] = 0x53; // VK_DELETE

    // ── Windows / Apps ───────────────────────────────────────────────────────
    t[0x5B] = 0x5B;
    t[0x5C] = 0x5C;
    t[0x5D] = 0x5D;

    // ── Numpad (VK_NUMPAD0=0x60 … VK_DIVIDE=0x6F) ────────────────────────────
    t[0x60] = 0x52;
    t[0x61] = 0x4F;
    t[0x62] = 0x50;
    t[0x63] = 0x51;
    t[0x64] = 0x4B;
    t[0x65] = 0x4C;
    t[0x66] = 0x4D;
    t[0x67] = 0x47;
    t[0x68] = 0x48;
    t[0x69] = 0x49;
    t[0x6A] = 0x37; // VK_MULTIPLY
    t[0x6B] = 0x4E; // VK_ADD
    t[0x6D] = 0x4A; // VK_SUBTRACT
    t[0x6E] = 0x53; // VK_DECIMAL
    t[0x6F] = 0x35; // VK_DIVIDE

    // ── Function keys (VK_F1=0x70 … VK_F12=0x7B) ─────────────────────────────
    t[0x70] = 0x3B;
    t[0x71] = 0x3C;
    t[0x72] = 0x3D;
    t[0x73] = 0x3E;
    t[0x74] = 0x3F;
    t[0x75] = 0x40;
    t[0x76] = 0x41;
    t[0x77] = 0x42;
    t[0x78] = 0x43;
    t[0x79] = 0x44;
    t[0x7A] = 0x57;
    t[0x7B] = 0x58;

    // ── Left/right modifiers ─────────────────────────────────────────────────
    t[0xA0] = 0x2A; // VK_LSHIFT
    t[0xA1] = 0x36; // VK_RSHIFT
    t[0xA2] = 0x1D; // VK_LCONTROL
    t[0xA3] = 0x1D; // VK_RCONTROL
    t[0xA4] = 0x38; // VK_LMENU
    t[0xA5] = 0x38; // VK_RMENU

    // ── OEM punctuation (US layout) ──────────────────────────────────────────
    t[0xBA] = 0x27; // ;
    t[0xBB] = 0x0D; // =
    t[0xBC] = 0x33; // ,
    t[0xBD] = 0x0C; // -
    t[0xBE] = 0x34; // .
    t[0xBF] = 0x35; // /
    t[0xC0] = 0x29; // `
    t[0xDB] = 0x1A; // [
    t[0xDC] = 0x2B; // \
    t[0xDD] = 0x1B; // ]
    t[0xDE] = 0x28; // '

    t
};
