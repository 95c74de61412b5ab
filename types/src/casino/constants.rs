/// Cards in a single deck (card = suit * 13 + rank, rank 0 = Ace).
pub const DECK_SIZE: u8 = 52;

/// Pockets on a single-zero (European) wheel, numbered 0-36.
pub const ROULETTE_POCKETS: u8 = 37;

/// Red pockets on a European wheel.
pub const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Pocket order around a European wheel, clockwise from zero.
pub const WHEEL_ORDER: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Blackjack target total.
pub const BLACKJACK: u8 = 21;

/// Default threshold below which the automatic player keeps hitting.
pub const DEFAULT_STAND_ON: u8 = 17;

/// Lowest cashout target accepted by crash (1.00x would always win).
pub const CRASH_MIN_TARGET: f64 = 1.01;

/// Cells on the mines board.
pub const MINES_GRID_SIZE: u8 = 25;

/// Width of the (square) mines board.
pub const MINES_GRID_WIDTH: u8 = 5;

/// Keno numbers run from 1 to this value.
pub const KENO_POOL: u8 = 80;

/// Numbers drawn per keno round.
pub const KENO_DRAWN: u8 = 20;

/// Maximum numbers a player may mark.
pub const KENO_MAX_PICKS: usize = 10;

/// Faces on a regular die.
pub const DIE_FACES: u8 = 6;

/// Outcomes of the composite slot die (4 symbols on 3 reels).
pub const SLOT_DICE_FACES: u8 = 64;

/// Number guess targets run from 1 to this value.
pub const NUMBER_GUESS_MAX: u8 = 100;

/// Distance that still counts as "near" in number guess.
pub const NUMBER_GUESS_NEAR: u8 = 5;

/// Distance that still counts as "close" in number guess.
pub const NUMBER_GUESS_CLOSE: u8 = 10;
