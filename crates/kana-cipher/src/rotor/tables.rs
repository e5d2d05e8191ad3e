// Rotor and reflector tables over the 80-symbol alphabet
//
// Wirings are forward permutations of [0, 80). Inverses and the reflector
// permutation are derived at compile time; the assertions at the bottom
// reject any table edit that breaks a permutation.

/// Number of contacts on every rotor.
pub const ROTOR_SIZE: usize = 80;

type Wiring = [u8; ROTOR_SIZE];

#[rustfmt::skip]
const WIRING_I: Wiring = [
    2, 3, 18, 5, 61, 66, 22, 34, 40, 21, 35, 15, 10, 78, 64, 17, 72, 79, 71, 4,
    67, 30, 77, 50, 52, 65, 60, 54, 1, 31, 25, 36, 33, 26, 20, 41, 37, 74, 59, 8,
    23, 62, 46, 55, 19, 38, 58, 57, 53, 42, 43, 75, 49, 76, 70, 24, 13, 68, 39, 16,
    9, 28, 45, 73, 11, 14, 7, 69, 63, 12, 29, 56, 51, 0, 47, 32, 44, 48, 6, 27,
];

#[rustfmt::skip]
const WIRING_II: Wiring = [
    79, 48, 17, 40, 51, 26, 37, 11, 3, 74, 33, 15, 9, 46, 27, 68, 64, 23, 54, 50,
    14, 34, 31, 73, 12, 29, 13, 44, 41, 43, 36, 47, 78, 62, 42, 65, 1, 38, 67, 45,
    18, 53, 22, 49, 76, 61, 6, 63, 60, 55, 66, 75, 77, 10, 7, 16, 57, 59, 25, 70,
    5, 72, 2, 0, 8, 4, 21, 32, 19, 24, 71, 56, 69, 58, 20, 28, 35, 52, 39, 30,
];

#[rustfmt::skip]
const WIRING_III: Wiring = [
    73, 25, 50, 7, 39, 22, 13, 18, 3, 11, 29, 19, 65, 26, 12, 59, 72, 70, 15, 74,
    23, 27, 49, 35, 1, 66, 4, 62, 21, 10, 53, 47, 56, 37, 61, 78, 77, 69, 64, 58,
    17, 43, 68, 36, 2, 71, 30, 63, 46, 34, 5, 79, 33, 38, 45, 48, 16, 60, 54, 52,
    20, 44, 31, 0, 76, 41, 51, 32, 55, 28, 14, 75, 42, 40, 8, 24, 9, 6, 67, 57,
];

#[rustfmt::skip]
const WIRING_IV: Wiring = [
    25, 72, 46, 7, 3, 9, 22, 11, 69, 2, 70, 21, 60, 78, 5, 24, 19, 23, 34, 27,
    42, 26, 4, 8, 31, 76, 65, 68, 41, 10, 13, 39, 56, 18, 38, 51, 17, 47, 52, 54,
    74, 53, 43, 62, 35, 57, 1, 49, 6, 55, 45, 59, 37, 20, 63, 32, 50, 40, 66, 67,
    15, 79, 61, 73, 0, 44, 33, 71, 12, 48, 77, 75, 30, 64, 29, 16, 58, 14, 36, 28,
];

#[rustfmt::skip]
const WIRING_V: Wiring = [
    18, 50, 13, 33, 1, 7, 3, 27, 45, 17, 62, 14, 46, 19, 15, 30, 79, 23, 60, 67,
    21, 35, 11, 55, 22, 58, 10, 47, 75, 66, 31, 77, 73, 53, 25, 56, 6, 42, 70, 51,
    74, 32, 61, 65, 2, 20, 41, 71, 59, 68, 72, 63, 37, 26, 9, 48, 12, 34, 43, 8,
    54, 40, 38, 76, 64, 28, 49, 69, 36, 4, 5, 16, 29, 44, 39, 24, 78, 52, 0, 57,
];

/// Forward wirings of rotors I to V.
pub const WIRINGS: [Wiring; 5] = [WIRING_I, WIRING_II, WIRING_III, WIRING_IV, WIRING_V];

/// Inverse wirings, used on the return path.
pub const INVERSE_WIRINGS: [Wiring; 5] = [
    invert(&WIRING_I),
    invert(&WIRING_II),
    invert(&WIRING_III),
    invert(&WIRING_IV),
    invert(&WIRING_V),
];

/// Offset at which each rotor carries into its left neighbour.
pub const NOTCHES: [u8; 5] = [39, 8, 47, 33, 23];

#[rustfmt::skip]
const REFLECTOR_PAIRS: [(u8, u8); ROTOR_SIZE / 2] = [
    (0, 24), (1, 5), (2, 64), (3, 46), (4, 39), (6, 79), (7, 10), (8, 65),
    (9, 59), (11, 63), (12, 43), (13, 45), (14, 27), (15, 34), (16, 58), (17, 33),
    (18, 19), (20, 78), (21, 31), (22, 50), (23, 30), (25, 48), (26, 70), (28, 76),
    (29, 61), (32, 40), (35, 55), (36, 68), (37, 38), (41, 74), (42, 72), (44, 62),
    (47, 66), (49, 73), (51, 77), (52, 57), (53, 67), (54, 56), (60, 69), (71, 75),
];

/// Reflector: swaps the two contacts of every pair.
pub const REFLECTOR: Wiring = reflector(&REFLECTOR_PAIRS);

// ---------------------------------------------------------------------------
// Compile-time construction and checks
// ---------------------------------------------------------------------------

const fn invert(wiring: &Wiring) -> Wiring {
    let mut inverse = [0u8; ROTOR_SIZE];
    let mut i = 0;
    while i < ROTOR_SIZE {
        inverse[wiring[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

const fn reflector(pairs: &[(u8, u8); ROTOR_SIZE / 2]) -> Wiring {
    let mut out = [u8::MAX; ROTOR_SIZE];
    let mut i = 0;
    while i < pairs.len() {
        let (a, b) = pairs[i];
        assert!(a != b, "reflector pair maps a contact to itself");
        assert!(
            out[a as usize] == u8::MAX && out[b as usize] == u8::MAX,
            "reflector contact appears in two pairs"
        );
        out[a as usize] = b;
        out[b as usize] = a;
        i += 1;
    }
    out
}

const fn is_permutation(wiring: &Wiring) -> bool {
    let mut seen = [false; ROTOR_SIZE];
    let mut i = 0;
    while i < ROTOR_SIZE {
        let v = wiring[i] as usize;
        if v >= ROTOR_SIZE || seen[v] {
            return false;
        }
        seen[v] = true;
        i += 1;
    }
    true
}

const _: () = {
    let mut r = 0;
    while r < WIRINGS.len() {
        assert!(is_permutation(&WIRINGS[r]), "rotor wiring is not a permutation");
        assert!((NOTCHES[r] as usize) < ROTOR_SIZE, "notch out of range");
        r += 1;
    }
    assert!(is_permutation(&REFLECTOR), "reflector is not a permutation");
    assert!(ROTOR_SIZE % 2 == 0);
};
