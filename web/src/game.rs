use cartela_core as game;
use game::{CARD_SIDE, CardCell, Coord2, GamePhase, LETTER_COUNT};
use gloo::dialogs::{alert, confirm};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::utils::*;

impl StorageKey for game::GameSession {
    const KEY: &'static str = "cartela:game";
}

const LETTERS: [&str; LETTER_COUNT] = ["B", "I", "N", "G", "O"];

const START_PROMPT: &str = "All 25 cells are filled! Are you ready to start the game?";
const START_NOTICE: &str = "Game started! You can now only mark numbers as they are called.";

/// Delay before the start prompt so the tap that completed the card is
/// rendered and persisted first.
const PROMPT_DELAY_MS: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellClick(Coord2),
    LetterClick(usize),
    RandomFill,
    Reset,
    StartConfirmed(bool),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    cell: CardCell,
    #[prop_or_default]
    locked: bool,
    callback: Callback<Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        cell,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell {
            CardCell::Empty => classes!(),
            CardCell::Filled(_) => classes!("filled"),
            CardCell::Marked(_) => classes!("filled", "marked"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        callback.emit((row, col));
        log::trace!("({}, {}) cell click", row, col);
    });

    let text = cell.value().map(|n| n.to_string()).unwrap_or_default();

    html! {
        <td {class} {onclick}>{text}</td>
    }
}

pub(crate) struct GameView {
    session: game::GameSession,
    pending_prompt: Option<Timeout>,
}

impl GameView {
    fn load_session() -> game::GameSession {
        storage_get(game::GameSession::KEY)
            .and_then(|raw| game::codec::decode(&raw))
            .unwrap_or_default()
    }

    fn persist(&self) {
        match game::codec::encode(&self.session) {
            Ok(blob) => storage_set(game::GameSession::KEY, &blob),
            Err(err) => log::error!("Could not serialize game state: {}", err),
        }
    }

    /// Arm the one-shot start prompt if this mutation completed the card.
    /// The dialog itself runs from a timeout and feeds its answer back
    /// through the normal message path.
    fn schedule_start_prompt(&mut self, ctx: &Context<Self>) {
        if self.session.take_start_prompt() {
            let link = ctx.link().clone();
            self.pending_prompt = Some(Timeout::new(PROMPT_DELAY_MS, move || {
                let accepted = confirm(START_PROMPT);
                link.send_message(Msg::StartConfirmed(accepted));
            }));
        }
    }

    fn toggle_cell(&mut self, coords: Coord2) -> bool {
        match self.session.toggle_cell(coords) {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                alert(&err.to_string());
                false
            }
        }
    }

    fn random_fill(&mut self) -> bool {
        match self.session.random_fill(js_random_seed()) {
            Ok(placed) => {
                log::debug!("random fill placed {} numbers", placed);
                true
            }
            Err(err) => {
                alert(&err.to_string());
                false
            }
        }
    }

    fn phase_class(&self) -> &'static str {
        match self.session.phase() {
            GamePhase::Setup => "setup",
            GamePhase::Playing => "playing",
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: GameView::load_session(),
            pending_prompt: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            CellClick(coords) => {
                log::debug!("cell click: {:?}", coords);
                let updated = self.toggle_cell(coords);
                if updated {
                    self.schedule_start_prompt(ctx);
                }
                updated
            }
            LetterClick(index) => match self.session.toggle_letter(index) {
                Ok(active) => {
                    log::debug!("letter {} now {}", index, active);
                    true
                }
                Err(err) => {
                    log::warn!("letter toggle rejected: {}", err);
                    false
                }
            },
            RandomFill => {
                let updated = self.random_fill();
                if updated {
                    self.schedule_start_prompt(ctx);
                }
                updated
            }
            Reset => {
                // Cancel any prompt still in flight and drop the stored
                // blob instead of overwriting it.
                self.pending_prompt = None;
                self.session.reset();
                storage_remove(game::GameSession::KEY);
                return true;
            }
            StartConfirmed(accepted) => {
                log::debug!("start confirmed: {}", accepted);
                self.pending_prompt = None;
                self.session.confirm_start(accepted);
                if accepted {
                    alert(START_NOTICE);
                }
                accepted
            }
        };

        if updated {
            self.persist();
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let cb_random_fill = ctx.link().callback(|_| RandomFill);
        let cb_reset = ctx.link().callback(|_| Reset);

        html! {
            <div class={classes!("cartela", self.phase_class())}>
                <nav>
                    {
                        for (0..LETTER_COUNT).map(|index| {
                            let active = self.session.letter_active(index);
                            let onclick = ctx.link().callback(move |_| LetterClick(index));
                            html! {
                                <span
                                    class={classes!("bingo-letter", active.then_some("active"))}
                                    {onclick}
                                >
                                    {LETTERS[index]}
                                </span>
                            }
                        })
                    }
                </nav>
                <table>
                    {
                        for (0..CARD_SIDE).map(|row| html! {
                            <tr>
                                {
                                    for (0..CARD_SIDE).map(|col| {
                                        let cell = self.session.cell_at((row, col));
                                        let locked = self.session.phase().is_playing()
                                            && !cell.is_filled();
                                        let callback = ctx.link().callback(Msg::CellClick);
                                        html! {
                                            <CellView {row} {col} {cell} {callback} {locked}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <footer>
                    <button onclick={cb_random_fill}>{"Random Fill"}</button>
                    <button onclick={cb_reset}>{"Reset"}</button>
                </footer>
            </div>
        }
    }
}
