//! Result assembly: stake math plus the text and animation frames a chat
//! front-end renders.
//!
//! Frames are a pure function of the outcome, so a replayed round animates
//! identically.

use super::cards::{card_label, hand_label};
use super::roulette;
use super::Resolution;
use luckybot_types::casino::{
    BaccaratOutcome, BaccaratSide, BlackjackOutcome, BlackjackSettlement, CrashOutcome, DiceBet,
    DiceOutcome, GameConfig, GameOutcome, GameResult, KenoOutcome, LuckyWheelOutcome,
    MinesOutcome, NumberGuessOutcome, RouletteBet, RouletteColor, RouletteOutcome, RpsOutcome,
    RpsResult, SlotDiceOutcome, SlotLine, SlotsOutcome, MINES_GRID_SIZE, MINES_GRID_WIDTH,
    WHEEL_ORDER,
};

/// Pockets shown while the roulette ball settles.
const ROULETTE_FRAMES: usize = 6;

/// Keno numbers revealed per frame.
const KENO_GROUP: usize = 5;

/// Growth per crash tick.
const CRASH_TICK: f64 = 1.35;
const MAX_CRASH_TICKS: usize = 12;

const HIDDEN: &str = "❔";

/// Turn a resolution into the caller-facing result.
///
/// The multiplier is clamped to the config's maximum before any amount is
/// computed, so `win_amount <= bet * max_multiplier` always holds.
pub fn assemble(bet_amount: u64, config: &GameConfig, resolution: Resolution) -> GameResult {
    let multiplier = resolution.multiplier.clamp(0.0, config.max_multiplier);
    let win_amount = (bet_amount as f64 * multiplier).round() as u64;
    let won = win_amount > bet_amount;

    let (headline, animation_frames) = render(&resolution.outcome);
    let display_text = format!(
        "{headline}\n{}",
        summary_line(bet_amount, win_amount, multiplier)
    );

    GameResult {
        won,
        win_amount,
        multiplier,
        outcome: resolution.outcome,
        display_text,
        animation_frames,
    }
}

fn summary_line(bet_amount: u64, win_amount: u64, multiplier: f64) -> String {
    if win_amount > bet_amount {
        format!("🎉 You win {win_amount} ({multiplier:.2}x)")
    } else if win_amount == bet_amount {
        "↩️ Stake returned".to_string()
    } else if win_amount > 0 {
        format!("🔸 {win_amount} of {bet_amount} returned ({multiplier:.2}x)")
    } else {
        format!("😢 You lose {bet_amount}")
    }
}

/// Headline and frames for an outcome.
fn render(outcome: &GameOutcome) -> (String, Vec<String>) {
    match outcome {
        GameOutcome::Slots(o) => render_slots(o),
        GameOutcome::Roulette(o) => render_roulette(o),
        GameOutcome::Blackjack(o) => render_blackjack(o),
        GameOutcome::Crash(o) => render_crash(o),
        GameOutcome::Mines(o) => render_mines(o),
        GameOutcome::Baccarat(o) => render_baccarat(o),
        GameOutcome::Keno(o) => render_keno(o),
        GameOutcome::Dice(o) => render_dice(o),
        GameOutcome::SlotDice(o) => render_slot_dice(o),
        GameOutcome::RockPaperScissors(o) => render_rps(o),
        GameOutcome::NumberGuess(o) => render_number_guess(o),
        GameOutcome::LuckyWheel(o) => render_wheel(o),
    }
}

/// Reveal `symbols` left to right, one frame per reel.
fn reel_frames(symbols: &[&str]) -> Vec<String> {
    (0..=symbols.len())
        .map(|shown| {
            symbols
                .iter()
                .enumerate()
                .map(|(i, s)| if i < shown { *s } else { HIDDEN })
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect()
}

fn render_slots(o: &SlotsOutcome) -> (String, Vec<String>) {
    let symbols: Vec<&str> = o.reels.iter().map(|s| s.emoji()).collect();
    let frames = reel_frames(&symbols);
    let line = match o.line {
        SlotLine::ThreeOfAKind(s) => format!("Three {}!", s.emoji()),
        SlotLine::Pair(s) => format!("Pair of {}", s.emoji()),
        SlotLine::NoMatch => "No match".to_string(),
    };
    (format!("🎰 {} · {line}", symbols.join(" | ")), frames)
}

fn color_icon(color: RouletteColor) -> &'static str {
    match color {
        RouletteColor::Green => "🟢",
        RouletteColor::Red => "🔴",
        RouletteColor::Black => "⚫",
    }
}

fn roulette_bet_label(bet: RouletteBet) -> String {
    match bet {
        RouletteBet::Straight(n) => format!("number {n}"),
        RouletteBet::Red => "red".into(),
        RouletteBet::Black => "black".into(),
        RouletteBet::Even => "even".into(),
        RouletteBet::Odd => "odd".into(),
        RouletteBet::Low => "1-18".into(),
        RouletteBet::High => "19-36".into(),
        RouletteBet::Dozen(d) => format!("{}-{}", d as u16 * 12 + 1, d as u16 * 12 + 12),
        RouletteBet::Column(c) => format!("column {}", c + 1),
    }
}

fn render_roulette(o: &RouletteOutcome) -> (String, Vec<String>) {
    let landing = WHEEL_ORDER
        .iter()
        .position(|&n| n == o.number)
        .unwrap_or(0);
    let len = WHEEL_ORDER.len();
    let frames = (0..ROULETTE_FRAMES)
        .rev()
        .map(|back| {
            let pocket = WHEEL_ORDER[(landing + len - back % len) % len];
            format!("{} {pocket}", color_icon(roulette::color(pocket)))
        })
        .collect();
    (
        format!(
            "🎡 {} {} · bet on {}",
            color_icon(o.color),
            o.number,
            roulette_bet_label(o.bet)
        ),
        frames,
    )
}

fn render_blackjack(o: &BlackjackOutcome) -> (String, Vec<String>) {
    let mut frames = Vec::new();
    // The hole card stays hidden until the player is done.
    let upcard = o.dealer_cards.first().map(|&c| card_label(c)).unwrap_or_default();
    frames.push(format!(
        "You: {} | Dealer: {upcard} {HIDDEN}",
        hand_label(&o.player_cards[..o.player_cards.len().min(2)])
    ));
    for shown in 3..=o.player_cards.len() {
        frames.push(format!(
            "You: {} | Dealer: {upcard} {HIDDEN}",
            hand_label(&o.player_cards[..shown])
        ));
    }
    for shown in 2..=o.dealer_cards.len() {
        frames.push(format!(
            "You: {} | Dealer: {}",
            hand_label(&o.player_cards),
            hand_label(&o.dealer_cards[..shown])
        ));
    }

    let verdict = match o.settlement {
        BlackjackSettlement::Natural => "Blackjack!",
        BlackjackSettlement::Win => "You beat the dealer",
        BlackjackSettlement::DealerBust => "Dealer busts",
        BlackjackSettlement::Push => "Push",
        BlackjackSettlement::DealerWins => "Dealer wins",
        BlackjackSettlement::DealerNatural => "Dealer blackjack",
        BlackjackSettlement::PlayerBust => "Bust",
    };
    (
        format!(
            "🃏 You {} ({}) · Dealer {} ({}) · {verdict}",
            hand_label(&o.player_cards),
            o.player_value,
            hand_label(&o.dealer_cards),
            o.dealer_value
        ),
        frames,
    )
}

fn render_crash(o: &CrashOutcome) -> (String, Vec<String>) {
    let cashed = o.crash_point >= o.cashout_target;
    let stop = if cashed { o.cashout_target } else { o.crash_point };

    let mut frames = Vec::new();
    let mut tick = 1.0;
    while tick < stop && frames.len() < MAX_CRASH_TICKS {
        frames.push(format!("📈 {tick:.2}x"));
        tick *= CRASH_TICK;
    }
    let headline = if cashed {
        frames.push(format!("✅ Cashed out at {:.2}x", o.cashout_target));
        format!(
            "🚀 Cashed out at {:.2}x · crashed at {:.2}x",
            o.cashout_target, o.crash_point
        )
    } else {
        frames.push(format!("💥 {:.2}x", o.crash_point));
        format!(
            "💥 Crashed at {:.2}x · target {:.2}x",
            o.crash_point, o.cashout_target
        )
    };
    (headline, frames)
}

/// Draw the board; `revealed` cells are open, mines shown when `show_mines`.
fn mines_grid(o: &MinesOutcome, revealed: &[u8], show_mines: bool) -> String {
    (0..MINES_GRID_SIZE)
        .collect::<Vec<_>>()
        .chunks(MINES_GRID_WIDTH as usize)
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let mine = o.mine_positions.contains(cell);
                    match (revealed.contains(cell), mine) {
                        (true, true) => "💥",
                        (true, false) => "💎",
                        (false, true) if show_mines => "💣",
                        _ => "⬜",
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_mines(o: &MinesOutcome) -> (String, Vec<String>) {
    let mut frames: Vec<String> = (1..=o.revealed_positions.len())
        .map(|shown| mines_grid(o, &o.revealed_positions[..shown], false))
        .collect();
    frames.push(mines_grid(o, &o.revealed_positions, true));

    let headline = if o.hit_mine {
        format!(
            "💣 Mine on pick {} of {} mines",
            o.revealed_positions.len(),
            o.mine_positions.len()
        )
    } else {
        format!(
            "💎 {} safe picks with {} mines",
            o.revealed_positions.len(),
            o.mine_positions.len()
        )
    };
    (headline, frames)
}

fn side_label(side: BaccaratSide) -> &'static str {
    match side {
        BaccaratSide::Player => "Player",
        BaccaratSide::Banker => "Banker",
        BaccaratSide::Tie => "Tie",
    }
}

fn render_baccarat(o: &BaccaratOutcome) -> (String, Vec<String>) {
    let mut frames = vec![format!(
        "Player: {} | Banker: {}",
        hand_label(&o.player_cards[..o.player_cards.len().min(2)]),
        hand_label(&o.banker_cards[..o.banker_cards.len().min(2)])
    )];
    if o.player_cards.len() > 2 {
        frames.push(format!(
            "Player: {} | Banker: {}",
            hand_label(&o.player_cards),
            hand_label(&o.banker_cards[..o.banker_cards.len().min(2)])
        ));
    }
    if o.banker_cards.len() > 2 {
        frames.push(format!(
            "Player: {} | Banker: {}",
            hand_label(&o.player_cards),
            hand_label(&o.banker_cards)
        ));
    }
    (
        format!(
            "🎴 Player {} · Banker {} · {} wins · bet on {}",
            o.player_value,
            o.banker_value,
            side_label(o.winner),
            side_label(o.choice)
        ),
        frames,
    )
}

fn render_keno(o: &KenoOutcome) -> (String, Vec<String>) {
    let drawn: Vec<u8> = o.drawn_numbers.iter().copied().collect();
    let mark = |n: &u8| {
        if o.chosen_numbers.contains(n) {
            format!("[{n}]")
        } else {
            n.to_string()
        }
    };
    let frames = (1..=drawn.len().div_ceil(KENO_GROUP))
        .map(|groups| {
            drawn[..(groups * KENO_GROUP).min(drawn.len())]
                .iter()
                .map(mark)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    (
        format!(
            "🔢 {} of {} numbers hit",
            o.hits,
            o.chosen_numbers.len()
        ),
        frames,
    )
}

fn dice_bet_label(bet: DiceBet) -> String {
    match bet {
        DiceBet::Exact(face) => format!("exactly {face}"),
        DiceBet::Low => "low (1-3)".into(),
        DiceBet::High => "high (4-6)".into(),
        DiceBet::Even => "even".into(),
        DiceBet::Odd => "odd".into(),
    }
}

fn render_dice(o: &DiceOutcome) -> (String, Vec<String>) {
    (
        format!("🎲 Rolled {} · bet on {}", o.roll, dice_bet_label(o.bet)),
        vec!["🎲 ...".to_string(), format!("🎲 {}", o.roll)],
    )
}

fn render_slot_dice(o: &SlotDiceOutcome) -> (String, Vec<String>) {
    let symbols: Vec<&str> = o.reels.iter().map(|s| s.emoji()).collect();
    (
        format!("🎰 {} ({})", symbols.join(" | "), o.value),
        reel_frames(&symbols),
    )
}

fn render_rps(o: &RpsOutcome) -> (String, Vec<String>) {
    let verdict = match o.result {
        RpsResult::Win => "You win the throw",
        RpsResult::Draw => "Draw",
        RpsResult::Loss => "Bot wins the throw",
    };
    let frames = vec![
        "✊ Rock...".to_string(),
        "✋ Paper...".to_string(),
        "✌️ Scissors...".to_string(),
        format!("{} vs {}", o.player.emoji(), o.bot.emoji()),
    ];
    (
        format!("{} vs {} · {verdict}", o.player.emoji(), o.bot.emoji()),
        frames,
    )
}

fn render_number_guess(o: &NumberGuessOutcome) -> (String, Vec<String>) {
    let frames = vec![
        format!("🔮 Your guess: {}", o.guess),
        format!("🔮 Target: {}", o.target),
    ];
    (
        format!(
            "🔮 Target {} · guess {} · off by {}",
            o.target, o.guess, o.distance
        ),
        frames,
    )
}

fn render_wheel(o: &LuckyWheelOutcome) -> (String, Vec<String>) {
    let frames = (0..=o.segment)
        .map(|i| if i == o.segment { format!("🎡 ▶ {}", o.label) } else { format!("🎡 {i}") })
        .collect();
    (format!("🎡 {}", o.label), frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use luckybot_types::casino::{SlotSymbol, Volatility};
    use std::collections::BTreeSet;

    fn config(max_multiplier: f64) -> GameConfig {
        GameConfig::new(1, 1_000_000, 0.05, max_multiplier, Volatility::Medium)
    }

    fn slots(multiplier: f64) -> Resolution {
        Resolution::new(
            multiplier,
            GameOutcome::Slots(SlotsOutcome {
                reels: [SlotSymbol::Cherry, SlotSymbol::Cherry, SlotSymbol::Lemon],
                line: SlotLine::Pair(SlotSymbol::Cherry),
            }),
        )
    }

    #[test]
    fn test_assemble_amounts() {
        let result = assemble(100, &config(250.0), slots(2.5));
        assert!(result.won);
        assert_eq!(result.win_amount, 250);
        assert_eq!(result.balance_delta(100), 150);

        let push = assemble(100, &config(250.0), slots(1.0));
        assert!(!push.won);
        assert!(push.is_push(100));

        let partial = assemble(100, &config(250.0), slots(0.5));
        assert!(!partial.won);
        assert_eq!(partial.win_amount, 50);

        let loss = assemble(100, &config(250.0), slots(0.0));
        assert_eq!(loss.win_amount, 0);
        assert!(loss.display_text.contains("lose"));
    }

    #[test]
    fn test_won_follows_rounded_amount() {
        // 10 * 1.0104 rounds back to the stake: a push, not a win.
        let result = assemble(10, &config(250.0), slots(1.0104));
        assert_eq!(result.win_amount, 10);
        assert!(!result.won);
        assert!(result.display_text.contains("Stake returned"));

        let result = assemble(1_000, &config(250.0), slots(1.0104));
        assert_eq!(result.win_amount, 1_010);
        assert!(result.won);
    }

    #[test]
    fn test_assemble_rounds() {
        let result = assemble(7, &config(10.0), slots(1.95));
        // 13.65 rounds to 14.
        assert_eq!(result.win_amount, 14);
    }

    #[test]
    fn test_assemble_clamps_to_max() {
        let result = assemble(10, &config(5.0), slots(40.0));
        assert_eq!(result.multiplier, 5.0);
        assert_eq!(result.win_amount, 50);
    }

    #[test]
    fn test_slot_frames_reveal_left_to_right() {
        let result = assemble(10, &config(250.0), slots(1.0));
        assert_eq!(
            result.animation_frames,
            vec![
                "❔ | ❔ | ❔".to_string(),
                "🍒 | ❔ | ❔".to_string(),
                "🍒 | 🍒 | ❔".to_string(),
                "🍒 | 🍒 | 🍋".to_string(),
            ]
        );
    }

    #[test]
    fn test_roulette_frames_end_on_result() {
        let outcome = RouletteOutcome {
            number: 0,
            color: RouletteColor::Green,
            bet: RouletteBet::Red,
        };
        let (_, frames) = render_roulette(&outcome);
        assert_eq!(frames.len(), ROULETTE_FRAMES);
        assert_eq!(frames.last().unwrap(), "🟢 0");
        // Wheel order wraps backwards past zero.
        assert_eq!(frames[frames.len() - 2], "⚫ 26");
    }

    #[test]
    fn test_mines_frames() {
        let outcome = MinesOutcome {
            mine_positions: [0, 24].into_iter().collect(),
            revealed_positions: vec![6, 24],
            hit_mine: true,
        };
        let (headline, frames) = render_mines(&outcome);
        assert_eq!(frames.len(), 3);
        assert!(frames[0].contains('💎'));
        assert!(!frames[0].contains('💥'));
        assert!(frames[1].ends_with('💥'));
        assert!(frames[2].starts_with('💣'));
        assert!(headline.contains("pick 2"));
    }

    #[test]
    fn test_keno_frames_in_groups() {
        let outcome = KenoOutcome {
            drawn_numbers: (1..=20).collect(),
            chosen_numbers: [3, 50].into_iter().collect::<BTreeSet<u8>>(),
            hits: 1,
        };
        let (_, frames) = render_keno(&outcome);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], "1 2 [3] 4 5");
        assert_eq!(frames[3].split(' ').count(), 20);
    }

    #[test]
    fn test_number_guess_frames_show_exact_target() {
        let outcome = NumberGuessOutcome {
            guess: 97,
            target: 100,
            distance: 3,
        };
        let (headline, frames) = render_number_guess(&outcome);
        assert_eq!(
            frames,
            vec!["🔮 Your guess: 97".to_string(), "🔮 Target: 100".to_string()]
        );
        assert!(headline.contains("off by 3"));
    }

    #[test]
    fn test_crash_frames() {
        let outcome = CrashOutcome {
            crash_point: 1.2,
            cashout_target: 2.0,
        };
        let (headline, frames) = render_crash(&outcome);
        assert_eq!(frames, vec!["📈 1.00x".to_string(), "💥 1.20x".to_string()]);
        assert!(headline.starts_with("💥"));
    }
}
