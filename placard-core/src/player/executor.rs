use placard_hal::NvMemory;

use crate::config::Tunables;
use crate::display::{MessageDisplay, RenderOutcome};
use crate::error::Error;
use crate::store::{Message, Slot, Store};
use crate::traits::{CharacterDisplay, Console, LightSensor, Wake};

/// Player state within a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerState {
    /// Not inside a pass
    #[default]
    Idle,
    /// Drawing or scrolling a message
    Rendering,
    /// Holding a message on screen for its duration
    Holding,
    /// Short pause between entries
    InterSlotPause,
}

/// How a pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PassOutcome {
    /// Every entry was processed; `rendered` counts non-skipped entries
    Completed { rendered: u8 },
    /// Input arrived while showing the entry at `slot`
    Interrupted { slot: Slot },
}

/// Runs schedule passes
pub struct Player {
    state: PlayerState,
    inter_slot_pause_ms: u32,
}

impl Player {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            state: PlayerState::Idle,
            inter_slot_pause_ms: tunables.inter_slot_pause_ms,
        }
    }

    /// Current state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Run one pass over the schedule
    ///
    /// The schedule is read from the store at the start of every pass. The
    /// byte that interrupts a pass is left unread on the console.
    pub async fn run_pass<M, D, C, L>(
        &mut self,
        store: &mut Store<M>,
        display: &mut MessageDisplay<D>,
        console: &mut C,
        light: &mut L,
    ) -> Result<PassOutcome, Error>
    where
        M: NvMemory,
        D: CharacterDisplay,
        C: Console,
        L: LightSensor,
    {
        let result = self.pass(store, display, console, light).await;
        self.state = PlayerState::Idle;
        result
    }

    async fn pass<M, D, C, L>(
        &mut self,
        store: &mut Store<M>,
        display: &mut MessageDisplay<D>,
        console: &mut C,
        light: &mut L,
    ) -> Result<PassOutcome, Error>
    where
        M: NvMemory,
        D: CharacterDisplay,
        C: Console,
        L: LightSensor,
    {
        let schedule = store.read_schedule().await?;
        let mut rendered = 0u8;

        for (slot, entry) in Slot::all().zip(schedule.iter()) {
            if entry.is_skipped() {
                continue;
            }

            // Out-of-range references show as an empty message
            let message = match entry.slot() {
                Some(source) => store.read_message(source).await?,
                None => Message::new(),
            };

            self.state = PlayerState::Rendering;
            if display.render(&message, console).await? == RenderOutcome::Interrupted {
                return Ok(PassOutcome::Interrupted { slot });
            }
            rendered = rendered.saturating_add(1);

            self.state = PlayerState::Holding;
            let hold_ms = u32::from(entry.duration_s) * 1000;
            if display.hold(&message, hold_ms, console).await? == Wake::Input {
                return Ok(PassOutcome::Interrupted { slot });
            }

            display.adjust_brightness(light.read())?;

            self.state = PlayerState::InterSlotPause;
            if console.sleep_ms(self.inter_slot_pause_ms).await == Wake::Input {
                return Ok(PassOutcome::Interrupted { slot });
            }
        }

        Ok(PassOutcome::Completed { rendered })
    }
}
