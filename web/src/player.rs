use gloo::timers::callback::Interval;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Playback is simulated: progress advances on a timer against a fixed
/// track length, there is no audio pipeline behind the panel.
const TRACK_TITLE: &str = "Starlight Run";
const TRACK_ARTIST: &str = "STELLIGHT";
const TRACK_DURATION_SECS: f64 = 205.0;

const PROGRESS_PERIOD_MS: u32 = 500;
const PROGRESS_STEP_SECS: f64 = 0.5;

const DEFAULT_VOLUME: u32 = 80;

pub(crate) fn format_time(secs: f64) -> String {
    let total = secs.max(0.0) as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

const fn volume_icon(volume: u32) -> &'static str {
    match volume {
        0 => "ri-volume-mute-line",
        1..50 => "ri-volume-down-line",
        _ => "ri-volume-up-line",
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    TogglePlay,
    Tick,
    Seek(f64),
    SetVolume(u32),
    ToggleMute,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct PlayerProps {
    #[prop_or_default]
    pub(crate) open: bool,
    pub(crate) onclose: Callback<()>,
}

pub(crate) struct PlayerView {
    playing: bool,
    current_secs: f64,
    volume: u32,
    last_volume: u32,
    _progress_interval: Interval,
}

impl PlayerView {
    fn create_progress_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(PROGRESS_PERIOD_MS, move || link.send_message(Msg::Tick))
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        if playing {
            log::info!("Now playing: {} - {}", TRACK_TITLE, TRACK_ARTIST);
        } else {
            log::info!("Playback paused");
        }
    }

    fn progress_percent(&self) -> f64 {
        self.current_secs / TRACK_DURATION_SECS * 100.0
    }
}

impl Component for PlayerView {
    type Message = Msg;
    type Properties = PlayerProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            playing: false,
            current_secs: 0.0,
            volume: DEFAULT_VOLUME,
            last_volume: DEFAULT_VOLUME,
            _progress_interval: PlayerView::create_progress_timer(ctx),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        // opening the panel starts playback, closing it pauses
        let open = ctx.props().open;
        if open != old_props.open && open != self.playing {
            self.set_playing(open);
        }
        true
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            TogglePlay => {
                self.set_playing(!self.playing);
                true
            }
            Tick => {
                if !self.playing || self.current_secs >= TRACK_DURATION_SECS {
                    return false;
                }
                self.current_secs =
                    (self.current_secs + PROGRESS_STEP_SECS).min(TRACK_DURATION_SECS);
                true
            }
            Seek(percent) => {
                self.current_secs = percent / 100.0 * TRACK_DURATION_SECS;
                true
            }
            SetVolume(volume) => {
                self.volume = volume.min(100);
                true
            }
            ToggleMute => {
                if self.volume > 0 {
                    self.last_volume = self.volume;
                    self.volume = 0;
                } else {
                    self.volume = self.last_volume.max(1);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let class = classes!("music-player", ctx.props().open.then_some("active"));
        let play_icon = if self.playing {
            "ri-pause-fill"
        } else {
            "ri-play-fill"
        };

        let cb_toggle_play = ctx.link().callback(|_| TogglePlay);
        let cb_mute = ctx.link().callback(|_| ToggleMute);
        let cb_close = {
            let onclose = ctx.props().onclose.clone();
            Callback::from(move |_: MouseEvent| onclose.emit(()))
        };
        let cb_seek = ctx.link().callback(|e: InputEvent| {
            let value = e
                .target_dyn_into::<HtmlInputElement>()
                .map_or(0.0, |input| input.value().parse().unwrap_or(0.0));
            Seek(value)
        });
        let cb_volume = ctx.link().callback(|e: InputEvent| {
            let value = e
                .target_dyn_into::<HtmlInputElement>()
                .map_or(0, |input| input.value().parse().unwrap_or(0));
            SetVolume(value)
        });

        html! {
            <aside {class}>
                <header class="player-header">
                    <span class="track-title">{TRACK_TITLE}</span>
                    <span class="track-artist">{TRACK_ARTIST}</span>
                    <button class="player-close" onclick={cb_close}>{"×"}</button>
                </header>
                <div class="player-controls">
                    <button class="play-btn" onclick={cb_toggle_play}>
                        <i class={play_icon}></i>
                    </button>
                    <input
                        class="progress-bar"
                        type="range"
                        min="0"
                        max="100"
                        value={format!("{:.0}", self.progress_percent())}
                        oninput={cb_seek}
                    />
                    <span class="current-time">{format_time(self.current_secs)}</span>
                    <span class="duration">{format_time(TRACK_DURATION_SECS)}</span>
                </div>
                <div class="player-volume">
                    <button class="volume-btn" onclick={cb_mute}>
                        <i class={volume_icon(self.volume)}></i>
                    </button>
                    <input
                        class="volume-slider"
                        type="range"
                        min="0"
                        max="100"
                        value={self.volume.to_string()}
                        oninput={cb_volume}
                    />
                </div>
            </aside>
        }
    }
}
