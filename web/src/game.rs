use gloo::timers::callback::{Interval, Timeout};
use memorito_core as game;
use game::{DeckGenerator, FlipOutcome, ShuffledDeckGenerator};
use yew::prelude::*;

use crate::utils::*;

impl StorageKey for game::Difficulty {
    const KEY: &'static str = "memorito:difficulty";
}

/// How long a mismatched pair stays face-up before flipping back.
const MISMATCH_DELAY_MS: u32 = 1_000;
const TICK_PERIOD_MS: u32 = 1_000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClicked(game::CardIndex),
    Tick,
    Start,
    ChangeDifficulty,
    /// Delayed un-flip for a mismatched pair, tagged with the deal it was
    /// scheduled in so a stale callback cannot touch a newer deal.
    ResolveMismatch { generation: u32 },
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a deal seed instead of random
    #[prop_or_default]
    pub(crate) seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    label: &'static str,
    face_up: bool,
    matched: bool,
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_view(props: &CardProps) -> Html {
    let CardProps {
        index,
        label,
        face_up,
        matched,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("card");
    if face_up {
        class.push("face-up");
    }
    if matched {
        class.push("matched");
    }
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <li {class} {onclick}>
            <span class="card-front">{"★"}</span>
            <span class="card-back">{label}</span>
        </li>
    }
}

pub(crate) struct GameView {
    difficulty: game::Difficulty,
    engine: game::PairEngine,
    /// Bumped on every re-deal; pending un-flip callbacks from older deals
    /// no longer match and are dropped.
    generation: u32,
    pending_unflip: Option<Timeout>,
    _timer_interval: Interval,
}

impl GameView {
    fn fresh_engine(&self, ctx: &Context<Self>) -> game::PairEngine {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let deck = ShuffledDeckGenerator::new(seed).generate(self.difficulty);
        game::PairEngine::new(deck)
    }

    /// Replaces the deal: new deck, cleared turn state, invalidated un-flip.
    fn redeal(&mut self, ctx: &Context<Self>) {
        self.generation = self.generation.wrapping_add(1);
        self.pending_unflip = None;
        self.engine = self.fresh_engine(ctx);
    }

    fn schedule_unflip(&mut self, ctx: &Context<Self>) {
        let generation = self.generation;
        let link = ctx.link().clone();
        // replacing the handle also cancels a previously pending un-flip
        self.pending_unflip = Some(Timeout::new(MISMATCH_DELAY_MS, move || {
            link.send_message(Msg::ResolveMismatch { generation });
        }));
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_PERIOD_MS, move || link.send_message(Msg::Tick))
    }

    fn difficulty_label(&self) -> String {
        format!("{:?} ({} pairs)", self.difficulty, self.difficulty.pair_count())
    }

    fn view_result(&self, ctx: &Context<Self>) -> Html {
        if !self.engine.state().is_ended() {
            return html! {};
        }

        let score = self.engine.score();
        let tier = game::ResultTier::for_score(score);
        let cb_play_again = ctx.link().callback(|_| Msg::Start);

        html! {
            <div class="result">
                <div class="result-emoji">{tier.emoji}</div>
                <h2 class="result-title">{"Round complete!"}</h2>
                <ul class="result-stats">
                    <li><span class="stat-label">{"Time"}</span><span class="stat-value">{format!("{}s", self.engine.elapsed_secs())}</span></li>
                    <li><span class="stat-label">{"Moves"}</span><span class="stat-value">{self.engine.moves()}</span></li>
                    <li><span class="stat-label">{"Score"}</span><span class="stat-value">{score}</span></li>
                </ul>
                <p class="result-message">{tier.message}</p>
                <button class="btn" onclick={cb_play_again}>{"Play again"}</button>
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let difficulty = game::Difficulty::local_or_default();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let deck = ShuffledDeckGenerator::new(seed).generate(difficulty);

        Self {
            difficulty,
            engine: game::PairEngine::new(deck),
            generation: 0,
            pending_unflip: None,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CardClicked(index) => match self.engine.flip(index) {
                Err(err) => {
                    log::error!("flip rejected: {err}");
                    false
                }
                Ok(outcome) => {
                    if outcome == FlipOutcome::Mismatched {
                        self.schedule_unflip(ctx);
                    }
                    outcome.has_update()
                }
            },
            Tick => self.engine.tick().has_update(),
            Start => {
                self.redeal(ctx);
                self.engine.start();
                true
            }
            ChangeDifficulty => {
                self.difficulty = self.difficulty.next();
                self.difficulty.local_save();
                log::info!("Difficulty switched to {}", self.difficulty_label());
                self.redeal(ctx);
                true
            }
            ResolveMismatch { generation } => {
                if generation != self.generation {
                    log::debug!("stale un-flip for deal {} dropped", generation);
                    return false;
                }
                self.pending_unflip = None;
                self.engine.resolve_mismatch().has_update()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let locked = !self.engine.state().accepts_input();
        let cb_start = ctx.link().callback(|_| Start);
        let cb_restart = ctx.link().callback(|_| Start);
        let cb_difficulty = ctx.link().callback(|_| ChangeDifficulty);

        html! {
            <div class="memory-game">
                <header class="game-header">
                    <h1 class="game-title">{"Member match"}</h1>
                    <p class="game-description">{"Find every matching pair of member cards!"}</p>
                </header>
                <ul class="game-stats">
                    <li class="stat">
                        <span class="stat-value">{format!("{}s", self.engine.elapsed_secs())}</span>
                        <span class="stat-label">{"Time"}</span>
                    </li>
                    <li class="stat">
                        <span class="stat-value">{self.engine.moves()}</span>
                        <span class="stat-label">{"Moves"}</span>
                    </li>
                    <li class="stat">
                        <span class="stat-value">{self.engine.score()}</span>
                        <span class="stat-label">{"Score"}</span>
                    </li>
                </ul>
                <nav class="game-controls">
                    <button class="btn" onclick={cb_start}>{"Start"}</button>
                    <button class="btn btn-secondary" onclick={cb_restart}>{"Restart"}</button>
                    <button class="btn btn-secondary" onclick={cb_difficulty}>
                        {format!("Difficulty: {}", self.difficulty_label())}
                    </button>
                </nav>
                <ul class="game-board">
                    {
                        for self.engine.deck().iter().enumerate().map(|(slot, card)| {
                            let index = slot as game::CardIndex;
                            let face_up = self.engine.is_face_up(index);
                            let callback = ctx.link().callback(Msg::CardClicked);
                            html! {
                                <CardView
                                    {index}
                                    label={card.label()}
                                    {face_up}
                                    matched={card.is_matched()}
                                    locked={locked || card.is_matched()}
                                    {callback}
                                />
                            }
                        })
                    }
                </ul>
                { self.view_result(ctx) }
            </div>
        }
    }
}
