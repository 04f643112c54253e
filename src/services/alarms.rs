//! Alarms service and scheduler
//!
//! Alarms match at minute resolution against the wall clock. The
//! scheduler ticks once a second; a repeating alarm therefore fires on
//! every tick of its matching minute, while a one-shot alarm disables
//! itself after the first fire. Time comes from a `Clock` collaborator
//! so tests can drive the scheduler deterministically.

use crate::config::{collections, CLOCK_TIME_FORMAT, SCHEDULER_TICK_SECS};
use crate::error::Result;
use crate::models::{Alarm, NewAlarm};
use crate::notify::{AudioPlayer, Notifier, Severity};
use crate::store::Store;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Clock backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[derive(Clone)]
pub struct AlarmsService {
    store: Store,
}

impl AlarmsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn set_alarm(&self, new: NewAlarm) -> Result<Alarm> {
        new.validate()?;

        let id = self.store.next_id(collections::ALARMS).await?;
        let alarm = Alarm {
            id,
            time: new.time.clone(),
            label: new.label_or_default(),
            sound: new.sound,
            repeat: new.repeat,
            active: true,
            created: Utc::now(),
        };

        let stored = alarm.clone();
        self.store
            .mutate::<Alarm, _, _>(collections::ALARMS, move |alarms| alarms.push(stored))
            .await?;

        tracing::info!("Set alarm {} for {}: {}", alarm.id, alarm.time, alarm.label);
        Ok(alarm)
    }

    pub async fn list_alarms(&self) -> Result<Vec<Alarm>> {
        self.store.load_or_default(collections::ALARMS).await
    }

    /// Flip an alarm between active and inactive. Unknown ids are a
    /// silent no-op.
    pub async fn toggle_alarm(&self, id: u64) -> Result<Option<Alarm>> {
        self.store
            .mutate::<Alarm, _, _>(collections::ALARMS, move |alarms| {
                let alarm = alarms.iter_mut().find(|a| a.id == id)?;
                alarm.active = !alarm.active;
                Some(alarm.clone())
            })
            .await
    }

    pub async fn delete_alarm(&self, id: u64) -> Result<()> {
        self.store
            .mutate::<Alarm, _, _>(collections::ALARMS, move |alarms| {
                alarms.retain(|a| a.id != id);
            })
            .await?;

        tracing::info!("Deleted alarm {}", id);
        Ok(())
    }
}

/// Background loop that fires due alarms.
pub struct AlarmScheduler {
    store: Store,
    notifier: Arc<dyn Notifier>,
    audio: Arc<dyn AudioPlayer>,
    clock: Arc<dyn Clock>,
}

impl AlarmScheduler {
    pub fn new(
        store: Store,
        notifier: Arc<dyn Notifier>,
        audio: Arc<dyn AudioPlayer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notifier,
            audio,
            clock,
        }
    }

    /// Spawn the tick loop. Errors inside a tick are logged; the loop
    /// never stops on its own.
    pub fn start(self) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(SCHEDULER_TICK_SECS));
            tracing::info!("Alarm scheduler started");

            loop {
                interval.tick().await;
                if let Err(err) = self.tick().await {
                    tracing::error!("Alarm tick failed: {}", err);
                }
            }
        });
    }

    /// One scheduler pass: fire every active alarm whose `HH:MM` equals
    /// the current minute. A corrupt alarms payload skips the tick
    /// without rewriting anything.
    pub async fn tick(&self) -> Result<()> {
        let alarms: Vec<Alarm> = match self.store.load(collections::ALARMS).await {
            Ok(alarms) => alarms,
            Err(err) if err.is_corrupt_data() => {
                tracing::warn!("Skipping alarm tick: {}", err);
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let current = self.clock.now().format(CLOCK_TIME_FORMAT).to_string();
        let mut expired: Vec<u64> = Vec::new();

        for alarm in alarms.iter().filter(|a| a.active && a.time == current) {
            self.fire(alarm);
            if !alarm.repeat {
                expired.push(alarm.id);
            }
        }

        if !expired.is_empty() {
            self.store
                .mutate::<Alarm, _, _>(collections::ALARMS, move |alarms| {
                    for alarm in alarms.iter_mut().filter(|a| expired.contains(&a.id)) {
                        alarm.active = false;
                    }
                })
                .await?;
        }

        Ok(())
    }

    fn fire(&self, alarm: &Alarm) {
        tracing::info!("Alarm {} fired: {}", alarm.id, alarm.label);
        self.notifier
            .notify(&format!("Alarm: {}", alarm.label), Severity::Warning);
        if let Err(err) = self.audio.play(alarm.sound) {
            tracing::warn!("Alarm sound failed for {}: {}", alarm.id, err);
        }
    }
}
