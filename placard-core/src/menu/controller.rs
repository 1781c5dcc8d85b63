use placard_hal::NvMemory;
use placard_protocol::{MenuChoice, TextField, ESC};

use crate::config::Tunables;
use crate::display::{MessageDisplay, RenderOutcome};
use crate::error::Error;
use crate::player::{PassOutcome, Player};
use crate::store::{Slot, Store, SLOT_COUNT};
use crate::traits::{CharacterDisplay, Console, ConsoleExt, LightSensor, Wake};

use super::prompt::{read_ranged, read_slot_key, read_text, Entry};
use super::screens;

/// What one [`Controller::poll`] step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// Handled a menu keypress; `None` if the key selects nothing
    Menu(Option<MenuChoice>),
    /// Ran a schedule pass
    Pass(PassOutcome),
    /// Waited with nothing to show
    Idle,
}

/// How a submenu ended
enum Exit {
    Done,
    Escaped,
}

/// Owns the devices and the menu session state
pub struct Controller<M, D, C, L> {
    store: Store<M>,
    display: MessageDisplay<D>,
    console: C,
    light: L,
    player: Player,
    tunables: Tunables,
    text: TextField,
    power_save: bool,
    banner_pending: bool,
}

impl<M, D, C, L> Controller<M, D, C, L>
where
    M: NvMemory,
    D: CharacterDisplay,
    C: Console,
    L: LightSensor,
{
    pub fn new(
        store: Store<M>,
        display: MessageDisplay<D>,
        console: C,
        light: L,
        tunables: Tunables,
    ) -> Self {
        Self {
            store,
            display,
            console,
            light,
            player: Player::new(&tunables),
            tunables,
            text: TextField::new(),
            power_save: false,
            banner_pending: true,
        }
    }

    /// Bring up the display and make sure the store holds valid data
    ///
    /// Returns `true` if the store was blank and defaults were written.
    pub async fn boot(&mut self) -> Result<bool, Error> {
        self.display.init()?;
        self.display.adjust_brightness(self.light.read())?;
        Ok(self.store.ensure_initialized().await?)
    }

    /// Run one step of the main loop
    ///
    /// Pending input starts or continues a menu session. Otherwise a schedule
    /// pass runs, unless power save is on.
    pub async fn poll(&mut self) -> Result<Activity, Error> {
        if self.console.input_pending() {
            let choice = self.menu_step().await?;
            return Ok(Activity::Menu(choice));
        }

        if self.power_save {
            self.console.sleep_ms(self.tunables.idle_poll_ms).await;
            return Ok(Activity::Idle);
        }

        let outcome = self
            .player
            .run_pass(
                &mut self.store,
                &mut self.display,
                &mut self.console,
                &mut self.light,
            )
            .await?;

        if let PassOutcome::Completed { rendered } = outcome {
            // Playback ran undisturbed: the next keypress opens a new session
            self.banner_pending = true;
            if rendered == 0 {
                self.console.sleep_ms(self.tunables.idle_poll_ms).await;
            }
        }
        Ok(Activity::Pass(outcome))
    }

    async fn menu_step(&mut self) -> Result<Option<MenuChoice>, Error> {
        let fresh = core::mem::take(&mut self.banner_pending);
        if fresh {
            screens::banner(&mut self.console).await?;
        }

        let key = self.console.read_byte().await;
        if key == ESC {
            if !fresh {
                screens::banner(&mut self.console).await?;
            }
            return Ok(None);
        }
        let Some(choice) = MenuChoice::from_key(key) else {
            return Ok(None);
        };

        self.console.write(&[key]).await?;
        self.console.newline().await?;
        match self.dispatch(choice).await? {
            Exit::Done => self.console.write_str(screens::PROMPT).await?,
            Exit::Escaped => screens::banner(&mut self.console).await?,
        }
        Ok(Some(choice))
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<Exit, Error> {
        match choice {
            MenuChoice::ViewMessages => self.view_messages().await,
            MenuChoice::EditMessage => self.edit_message().await,
            MenuChoice::InstantMessage => self.instant_message().await,
            MenuChoice::EditSchedule => self.edit_schedule().await,
            MenuChoice::ViewSchedule => self.view_schedule().await,
            MenuChoice::TogglePowerSave => self.toggle_power_save().await,
        }
    }

    async fn view_messages(&mut self) -> Result<Exit, Error> {
        for slot in Slot::all() {
            let text = self.store.read_message(slot).await?;
            screens::message_line(&mut self.console, slot, &text).await?;
        }
        Ok(Exit::Done)
    }

    async fn edit_message(&mut self) -> Result<Exit, Error> {
        let prompt = "Message slot (0-5): ";
        let Entry::Value(slot) = read_slot_key(&mut self.console, prompt).await? else {
            return Ok(Exit::Escaped);
        };

        let current = self.store.read_message(slot).await?;
        self.console
            .print(format_args!("Current: {}\r\nNew text: ", current))
            .await?;
        if read_text(&mut self.console, &mut self.text).await? == Entry::Escaped {
            return Ok(Exit::Escaped);
        }

        self.store.write_message(slot, self.text.as_str()).await?;
        self.console
            .print(format_args!("Saved message {}\r\n", slot))
            .await?;
        Ok(Exit::Done)
    }

    async fn instant_message(&mut self) -> Result<Exit, Error> {
        self.console.write_str("Message: ").await?;
        if read_text(&mut self.console, &mut self.text).await? == Entry::Escaped {
            return Ok(Exit::Escaped);
        }

        self.console
            .print(format_args!(
                "Showing for {} s, any key stops\r\n",
                self.tunables.instant_timeout_s
            ))
            .await?;
        if self.power_save {
            self.display.wake()?;
        }

        let outcome = self
            .display
            .render(self.text.as_str(), &mut self.console)
            .await?;
        if outcome == RenderOutcome::Completed {
            let hold_ms = u32::from(self.tunables.instant_timeout_s) * 1000;
            let text = self.text.as_str();
            if self.display.hold(text, hold_ms, &mut self.console).await? == Wake::Input {
                self.console.write_str("Stopped\r\n").await?;
            }
        }

        if self.power_save {
            self.display.blank()?;
        } else {
            self.display.clear()?;
        }
        Ok(Exit::Done)
    }

    async fn edit_schedule(&mut self) -> Result<Exit, Error> {
        let last = (SLOT_COUNT - 1) as u8;
        let Entry::Value(position) =
            read_ranged(&mut self.console, "Schedule slot (0-5): ", last).await?
        else {
            return Ok(Exit::Escaped);
        };
        let Entry::Value(message) =
            read_ranged(&mut self.console, "Message number (0-5): ", last).await?
        else {
            return Ok(Exit::Escaped);
        };
        let Entry::Value(duration_s) =
            read_ranged(&mut self.console, "Seconds (0-255): ", u8::MAX).await?
        else {
            return Ok(Exit::Escaped);
        };

        let mut schedule = self.store.read_schedule().await?;
        let entry = &mut schedule[usize::from(position)];
        entry.message = message;
        entry.duration_s = duration_s;
        self.store.write_schedule(&schedule).await?;

        self.console
            .print(format_args!(
                "Slot {} now shows message {} for {} s\r\n",
                position, message, duration_s
            ))
            .await?;
        Ok(Exit::Done)
    }

    async fn view_schedule(&mut self) -> Result<Exit, Error> {
        let schedule = self.store.read_schedule().await?;
        for (slot, entry) in Slot::all().zip(schedule.iter()) {
            screens::schedule_line(&mut self.console, slot, entry).await?;
        }
        Ok(Exit::Done)
    }

    async fn toggle_power_save(&mut self) -> Result<Exit, Error> {
        self.power_save = !self.power_save;
        if self.power_save {
            self.display.blank()?;
            self.console.write_str("Power save on\r\n").await?;
        } else {
            self.display.wake()?;
            self.console.write_str("Power save off\r\n").await?;
        }
        Ok(Exit::Done)
    }

    /// Whether power save is active
    pub fn power_save(&self) -> bool {
        self.power_save
    }

    pub fn store_mut(&mut self) -> &mut Store<M> {
        &mut self.store
    }

    pub fn display(&self) -> &MessageDisplay<D> {
        &self.display
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}
