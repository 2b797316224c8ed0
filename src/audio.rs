//! Ambient audio toggle
//!
//! The page carries a looping ambient track that never autoplays. The toggle
//! button starts and stops it; when the browser refuses playback the button
//! falls back to its paused look.

/// Button title while audio is playing
pub const TITLE_PLAYING: &str = "Mute ambient audio";
/// Button title while audio is paused
pub const TITLE_PAUSED: &str = "Play ambient audio";

/// What the click asks the media element to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play,
    Pause,
}

/// Toggle button state. Playback state itself is read from the element.
#[derive(Debug, Clone, Default)]
pub struct AudioToggle {
    active: bool,
    /// Last title written to the button (None until the first change)
    title: Option<&'static str>,
}

impl AudioToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The button shows the `active` class only once playback is confirmed
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn title(&self) -> Option<&'static str> {
        self.title
    }

    fn show_paused(&mut self) {
        self.active = false;
        self.title = Some(TITLE_PAUSED);
    }

    /// A click on the toggle, given the element's current `paused` flag
    pub fn click(&mut self, element_paused: bool) -> AudioCommand {
        if element_paused {
            AudioCommand::Play
        } else {
            self.show_paused();
            AudioCommand::Pause
        }
    }

    /// The browser accepted `play()`. A pause that landed first wins.
    pub fn play_resolved(&mut self, element_paused: bool) {
        if !element_paused {
            self.active = true;
            self.title = Some(TITLE_PLAYING);
        }
    }

    /// The browser refused `play()` (autoplay policy, missing source, or a pause while pending)
    pub fn play_rejected(&mut self) {
        self.active = false;
    }

    /// The element paused on its own: media keys, an OS interruption
    pub fn element_paused(&mut self) {
        if self.active {
            self.show_paused();
        }
    }
}

/// The toggle wired to the page's `<audio>` element (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct AmbientAudio {
    audio: web_sys::HtmlAudioElement,
    button: web_sys::Element,
    toggle: std::cell::RefCell<AudioToggle>,
}

#[cfg(target_arch = "wasm32")]
impl AmbientAudio {
    pub fn new(audio: web_sys::HtmlAudioElement, button: web_sys::Element, volume: f32) -> Self {
        audio.set_volume(volume.clamp(0.0, 1.0) as f64);
        Self {
            audio,
            button,
            toggle: std::cell::RefCell::new(AudioToggle::new()),
        }
    }

    pub fn element(&self) -> &web_sys::HtmlAudioElement {
        &self.audio
    }

    fn sync_button(&self) {
        let toggle = self.toggle.borrow();
        let class_list = self.button.class_list();
        let _ = if toggle.is_active() {
            class_list.add_1("active")
        } else {
            class_list.remove_1("active")
        };
        if let Some(title) = toggle.title() {
            let _ = self.button.set_attribute("title", title);
        }
    }

    /// Handle a click on the toggle
    pub fn click(self: &std::rc::Rc<Self>) {
        let command = self.toggle.borrow_mut().click(self.audio.paused());
        match command {
            AudioCommand::Pause => {
                let _ = self.audio.pause();
                self.sync_button();
            }
            AudioCommand::Play => match self.audio.play() {
                Ok(promise) => {
                    let this = self.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match wasm_bindgen_futures::JsFuture::from(promise).await {
                            Ok(_) => this.toggle.borrow_mut().play_resolved(this.audio.paused()),
                            Err(e) => {
                                log::debug!("Ambient audio playback refused: {:?}", e);
                                this.toggle.borrow_mut().play_rejected();
                            }
                        }
                        this.sync_button();
                    });
                }
                Err(e) => {
                    log::warn!("Ambient audio play() failed: {:?}", e);
                    self.toggle.borrow_mut().play_rejected();
                    self.sync_button();
                }
            },
        }
    }

    /// Handle the element's `pause` event
    pub fn on_pause(&self) {
        self.toggle.borrow_mut().element_paused();
        self.sync_button();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive_with_no_title_change() {
        let toggle = AudioToggle::new();
        assert!(!toggle.is_active());
        assert_eq!(toggle.title(), None);
    }

    #[test]
    fn test_play_then_pause() {
        let mut toggle = AudioToggle::new();
        assert_eq!(toggle.click(true), AudioCommand::Play);
        // Not active until the browser confirms
        assert!(!toggle.is_active());
        assert_eq!(toggle.title(), None);

        toggle.play_resolved(false);
        assert!(toggle.is_active());
        assert_eq!(toggle.title(), Some(TITLE_PLAYING));

        assert_eq!(toggle.click(false), AudioCommand::Pause);
        assert!(!toggle.is_active());
        assert_eq!(toggle.title(), Some(TITLE_PAUSED));
    }

    #[test]
    fn test_rejected_play_stays_inactive() {
        let mut toggle = AudioToggle::new();
        toggle.click(true);
        toggle.play_rejected();
        assert!(!toggle.is_active());
        assert_eq!(toggle.title(), None);

        // Element is still paused, so the next click tries again
        assert_eq!(toggle.click(true), AudioCommand::Play);
    }

    #[test]
    fn test_click_follows_external_pause() {
        let mut toggle = AudioToggle::new();
        toggle.click(true);
        toggle.play_resolved(false);

        // Media keys pause the element behind the page's back
        toggle.element_paused();
        assert!(!toggle.is_active());
        assert_eq!(toggle.title(), Some(TITLE_PAUSED));

        assert_eq!(toggle.click(true), AudioCommand::Play);
    }

    #[test]
    fn test_click_reads_element_even_without_pause_event() {
        let mut toggle = AudioToggle::new();
        toggle.click(true);
        toggle.play_resolved(false);
        // No pause event seen, but the element reports paused
        assert_eq!(toggle.click(true), AudioCommand::Play);
    }

    #[test]
    fn test_resolution_after_pause_ignored() {
        let mut toggle = AudioToggle::new();
        toggle.click(true);
        toggle.play_resolved(true);
        assert!(!toggle.is_active());
        assert_eq!(toggle.title(), None);
    }
}
