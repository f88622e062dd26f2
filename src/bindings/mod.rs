//! Bindings, one per element kind the server renders.
//!
//! | Kind | Binding | Reacts to |
//! |------|---------|-----------|
//! | `CardPlay` | [`CardPlay`] | click: press feedback plus a clone flying to the desk |
//! | `DeskCard` | [`Deal::desk`] | appended desk cards: staggered entrance |
//! | `HandCards` | [`Deal::hand`] | appended hand cards: staggered entrance |
//! | `CardFlip` | [`CardFlip`] | rising edge of `data-flip` |
//! | `RoundIndicator` | [`RoundIndicator`] | `data-round` transitions |
//! | `TurnProgress` | [`TurnProgress`] | `data-turn` / `data-max-turns` |
//! | `WinCelebration` | [`WinCelebration`] | `data-winner="true"` |
//! | `GameFlash` | [`GameFlash`] | `game_flash` server push |
//! | `CardTilt` | [`CardTilt`] | pointer move / leave |

pub mod card_flip;
pub mod card_play;
pub mod card_tilt;
pub mod deal;
pub mod game_flash;
pub mod round;
pub mod turn;
pub mod win;

pub use card_flip::CardFlip;
pub use card_play::CardPlay;
pub use card_tilt::CardTilt;
pub use deal::Deal;
pub use game_flash::GameFlash;
pub use round::RoundIndicator;
pub use turn::TurnProgress;
pub use win::WinCelebration;

use crate::binding::{Registry, factory};
use crate::dom::Dom;

/// Register every shipped binding under its kind name.
pub fn register_standard<D: Dom>(registry: &mut Registry<D>) {
    registry
        .register(card_play::KIND, factory::<D, CardPlay>)
        .register(deal::DESK_KIND, deal::desk_factory::<D>)
        .register(deal::HAND_KIND, deal::hand_factory::<D>)
        .register(card_flip::KIND, factory::<D, CardFlip>)
        .register(round::KIND, factory::<D, RoundIndicator>)
        .register(turn::KIND, factory::<D, TurnProgress>)
        .register(win::KIND, factory::<D, WinCelebration>)
        .register(game_flash::KIND, factory::<D, GameFlash>)
        .register(card_tilt::KIND, factory::<D, CardTilt>);
}
