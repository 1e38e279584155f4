use gloo::events::EventListener;
use yew::prelude::*;

use crate::game::GameView;
use crate::player::PlayerView;
use crate::theme::Theme;

/// Hash-routed pages. The first `&`-separated segment of `location.hash` is
/// the route; anything after it belongs to the flag parser.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Members,
    Game,
    Media,
}

impl Route {
    pub(crate) const ALL: [Route; 4] = [Route::Home, Route::Members, Route::Game, Route::Media];

    pub(crate) fn from_hash(hash: &str) -> Self {
        use Route::*;
        match hash.trim_start_matches('#').split('&').next().unwrap_or("") {
            "members" => Members,
            "game" => Game,
            "media" => Media,
            _ => Home,
        }
    }

    pub(crate) const fn hash(self) -> &'static str {
        use Route::*;
        match self {
            Home => "#home",
            Members => "#members",
            Game => "#game",
            Media => "#media",
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        use Route::*;
        match self {
            Home => "Home",
            Members => "Members",
            Game => "Game",
            Media => "Media",
        }
    }

    pub(crate) const fn title(self) -> &'static str {
        use Route::*;
        match self {
            Home => "STELLIGHT - Home",
            Members => "STELLIGHT - Members",
            Game => "STELLIGHT - Memory game",
            Media => "STELLIGHT - Media",
        }
    }
}

/// Member blurbs shown on the members page, aligned with the roster order.
const MEMBER_ROLES: [&str; 8] = [
    "Leader / main vocal",
    "Main dancer",
    "Vocal / visual",
    "Rapper / producer",
    "Lead dancer / rapper",
    "Vocal",
    "Lead vocal",
    "Maknae / main dancer",
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    RouteChanged(Route),
    ToggleTheme,
    ToggleNav,
    TogglePlayer,
    ClosePlayer,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    /// Force a deal seed instead of random
    #[prop_or_default]
    pub(crate) seed: Option<u64>,
}

pub(crate) struct App {
    route: Route,
    theme: Theme,
    nav_open: bool,
    player_open: bool,
    _hash_listener: EventListener,
}

impl App {
    fn current_route() -> Route {
        let hash = gloo::utils::window().location().hash().unwrap_or_default();
        Route::from_hash(&hash)
    }

    fn set_document_title(route: Route) {
        gloo::utils::document().set_title(route.title());
    }

    fn view_home(&self) -> Html {
        html! {
            <section class="page page-home">
                <h1>{"STELLIGHT"}</h1>
                <p class="tagline">{"Eight members, one light. Welcome to the fan site!"}</p>
                <p>{"Head over to the game page and test how well you know the members."}</p>
            </section>
        }
    }

    fn view_members(&self) -> Html {
        html! {
            <section class="page page-members">
                <h1>{"Members"}</h1>
                <ul class="member-grid">
                    {
                        for memorito_core::ROSTER.iter().zip(MEMBER_ROLES).map(|(name, role)| html! {
                            <li class="member-card">
                                <span class="member-name">{*name}</span>
                                <span class="member-role">{role}</span>
                            </li>
                        })
                    }
                </ul>
            </section>
        }
    }

    fn view_media(&self) -> Html {
        html! {
            <section class="page page-media">
                <h1>{"Media"}</h1>
                <p>{"Open the player from the top bar to listen along while you browse."}</p>
                <ul class="album-list">
                    <li><span class="album-title">{"Sparkling Dawn"}</span><span class="album-track">{"Starlight Run"}</span></li>
                    <li><span class="album-title">{"SUMMER GLOW!"}</span><span class="album-track">{"hey! stay!"}</span></li>
                    <li><span class="album-title">{"TRY WITH US"}</span><span class="album-track">{"Plot Device"}</span></li>
                </ul>
            </section>
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let route = App::current_route();
        App::set_document_title(route);

        let link = ctx.link().clone();
        let hash_listener = EventListener::new(&gloo::utils::window(), "hashchange", move |_| {
            link.send_message(Msg::RouteChanged(App::current_route()));
        });

        Self {
            route,
            theme: Theme::init(),
            nav_open: false,
            player_open: false,
            _hash_listener: hash_listener,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            RouteChanged(route) => {
                if self.route == route {
                    return false;
                }
                log::debug!("route: {:?} -> {:?}", self.route, route);
                self.route = route;
                App::set_document_title(route);
                // mobile menu closes on navigation
                self.nav_open = false;
                true
            }
            ToggleTheme => {
                self.theme = self.theme.toggled();
                self.theme.apply();
                log::info!("Theme switched to {}", self.theme.scheme());
                true
            }
            ToggleNav => {
                self.nav_open = !self.nav_open;
                true
            }
            TogglePlayer => {
                self.player_open = !self.player_open;
                true
            }
            ClosePlayer => {
                if !self.player_open {
                    return false;
                }
                self.player_open = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let cb_theme = ctx.link().callback(|_| ToggleTheme);
        let cb_nav = ctx.link().callback(|_| ToggleNav);
        let cb_player = ctx.link().callback(|_| TogglePlayer);
        let cb_player_close = ctx.link().callback(|_| ClosePlayer);

        let nav_class = classes!("nav-menu", self.nav_open.then_some("active"));
        let theme_icon = match self.theme {
            Theme::Light => "ri-moon-line",
            Theme::Dark => "ri-sun-line",
        };

        let page = match self.route {
            Route::Home => self.view_home(),
            Route::Members => self.view_members(),
            Route::Game => html! {
                <section class="page page-game">
                    <GameView seed={ctx.props().seed} />
                </section>
            },
            Route::Media => self.view_media(),
        };

        html! {
            <div class="site">
                <header class="site-header">
                    <a class="logo" href={Route::Home.hash()}>{"STELLIGHT"}</a>
                    <nav class={nav_class}>
                        {
                            for Route::ALL.iter().map(|&route| {
                                let class = classes!(
                                    "nav-link",
                                    (route == self.route).then_some("active"),
                                );
                                html! {
                                    <a {class} href={route.hash()}>{route.label()}</a>
                                }
                            })
                        }
                    </nav>
                    <button class="theme-toggle" onclick={cb_theme}>
                        <i class={theme_icon}></i>
                    </button>
                    <button class="player-toggle" onclick={cb_player}>
                        <i class="ri-music-2-line"></i>
                    </button>
                    <button class="nav-toggle" onclick={cb_nav}>
                        <span class="hamburger"></span>
                    </button>
                </header>
                <main class="site-content">
                    { page }
                </main>
                <PlayerView open={self.player_open} onclose={cb_player_close} />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_hashes_fall_back_to_home() {
        assert_eq!(Route::from_hash(""), Route::Home);
        assert_eq!(Route::from_hash("#"), Route::Home);
        assert_eq!(Route::from_hash("#somewhere"), Route::Home);
    }

    #[test]
    fn routes_parse_from_their_own_hashes() {
        for route in Route::ALL {
            assert_eq!(Route::from_hash(route.hash()), route);
        }
    }

    #[test]
    fn flag_segments_do_not_change_the_route() {
        assert_eq!(Route::from_hash("#game&-v&--seed=7"), Route::Game);
        assert_eq!(Route::from_hash("#-v"), Route::Home);
    }

    #[test]
    fn every_member_has_a_role_blurb() {
        assert_eq!(memorito_core::ROSTER.len(), MEMBER_ROLES.len());
    }
}
