//! Shared engine doubles for the integration tests.
//!
//! One recorder is shared by every engine a factory creates, so tests can
//! assert ordering across session replacements (destroy before create) and
//! count live instances.

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use wavecrate_core::Result;
use wavecrate_player::{
    EngineEvent, EngineFactory, EngineOptions, EngineOptionsUpdate, MemoryStore, PreferenceStore,
    WaveformEngine,
};

#[derive(Default)]
pub struct Recorder {
    pub log: Vec<String>,
    pub senders: Vec<Sender<EngineEvent>>,
    pub created_options: Vec<EngineOptions>,
    pub time: f64,
    pub playing: bool,
    pub live_resize: bool,
    pub live_engines: usize,
}

pub type SharedRecorder = Rc<RefCell<Recorder>>;

pub fn recorder() -> SharedRecorder {
    Rc::new(RefCell::new(Recorder::default()))
}

/// Send an event into the most recently created engine.
pub fn send(shared: &SharedRecorder, event: EngineEvent) {
    let sender = shared.borrow().senders.last().cloned();
    sender
        .expect("no engine has been created")
        .send(event)
        .expect("engine event channel closed");
}

pub fn log(shared: &SharedRecorder) -> Vec<String> {
    shared.borrow().log.clone()
}

pub struct RecordingEngine {
    shared: SharedRecorder,
    rx: Receiver<EngineEvent>,
}

impl Drop for RecordingEngine {
    fn drop(&mut self) {
        let mut shared = self.shared.borrow_mut();
        shared.live_engines -= 1;
        shared.log.push("destroy".to_string());
    }
}

impl WaveformEngine for RecordingEngine {
    fn load(&mut self, url: &str) -> Result<()> {
        self.shared.borrow_mut().log.push(format!("load:{url}"));
        Ok(())
    }

    fn play(&mut self) {
        let mut shared = self.shared.borrow_mut();
        shared.playing = true;
        shared.log.push("play".to_string());
    }

    fn pause(&mut self) {
        let mut shared = self.shared.borrow_mut();
        shared.playing = false;
        shared.log.push("pause".to_string());
    }

    fn is_playing(&self) -> bool {
        self.shared.borrow().playing
    }

    fn current_time(&self) -> f64 {
        self.shared.borrow().time
    }

    fn duration(&self) -> f64 {
        0.0
    }

    fn seek_to(&mut self, fraction: f64) {
        self.shared
            .borrow_mut()
            .log
            .push(format!("seek:{fraction}"));
    }

    fn set_volume(&mut self, volume: f64) {
        self.shared
            .borrow_mut()
            .log
            .push(format!("volume:{volume}"));
    }

    fn apply_options(&mut self, update: &EngineOptionsUpdate) -> bool {
        let mut shared = self.shared.borrow_mut();
        if shared.live_resize {
            shared
                .log
                .push(format!("resize:{}", update.height.unwrap_or(0)));
            true
        } else {
            false
        }
    }

    fn events(&self) -> &Receiver<EngineEvent> {
        &self.rx
    }
}

pub struct RecordingFactory {
    pub shared: SharedRecorder,
}

impl EngineFactory for RecordingFactory {
    fn create(&self, options: &EngineOptions) -> Result<Box<dyn WaveformEngine>> {
        let mut shared = self.shared.borrow_mut();
        shared.log.push(format!("create:h{}", options.height));
        shared.created_options.push(options.clone());
        shared.live_engines += 1;
        shared.playing = false;
        let (tx, rx) = unbounded();
        shared.senders.push(tx);
        Ok(Box::new(RecordingEngine {
            shared: self.shared.clone(),
            rx,
        }))
    }
}

/// Preference store whose backing map outlives any one controller, so a
/// test can hand the same storage to successive controllers.
#[derive(Clone, Default)]
pub struct SharedMemoryStore(pub Rc<RefCell<MemoryStore>>);

impl SharedMemoryStore {
    pub fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.0.borrow_mut().set(key, value);
    }
}

impl PreferenceStore for SharedMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.borrow_mut().set(key, value);
    }
}
