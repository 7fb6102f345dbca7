use super::{
    diagnostics::Diagnostics, directory::Directory, header::Header, master_detail::MasterDetail,
};
use crate::device::use_touch_primary;
use std::rc::Rc;

use crate::records::{Catalog, Category, DetailRecord, DisplayContract};
use crate::storage::{Theme, apply_theme, default_store, system_prefers_dark};
use yew::prelude::*;

#[derive(PartialEq, Clone, Debug)]
enum View {
    Directory,
    Detail(DetailRecord),
}

/// Which page is shown plus the directory's tab and search text. The directory
/// fields live here so a detail round trip comes back to the same listing.
#[derive(PartialEq, Clone, Debug)]
struct Navigation {
    view: View,
    category: Category,
    query: String,
}

impl Navigation {
    fn new(category: Category) -> Self {
        Self {
            view: View::Directory,
            category,
            query: String::new(),
        }
    }
}

enum NavAction {
    Open(DetailRecord),
    Return,
    SetCategory(Category),
    SetQuery(String),
}

impl Reducible for Navigation {
    type Action = NavAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            NavAction::Open(record) => new.view = View::Detail(record),
            NavAction::Return => new.view = View::Directory,
            NavAction::SetCategory(c) => new.category = c,
            NavAction::SetQuery(q) => new.query = q,
        }
        Rc::new(new)
    }
}

fn initial_category() -> Category {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|s| Category::from_query_string(&s))
        .unwrap_or(Category::All)
}

// Site-wide settings handed down instead of read from globals.
#[derive(Clone, PartialEq)]
pub struct SiteContext {
    pub theme: Theme,
    pub toggle_theme: Callback<()>,
    pub touch_primary: bool,
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_memo((), |_| default_store());
    let catalog = use_memo((), |_| Catalog::embedded());
    let nav = use_reducer(|| Navigation::new(initial_category()));
    let show_diagnostics = use_state(|| false);
    let touch_primary = use_touch_primary();
    let theme = {
        let store = store.clone();
        use_state(move || Theme::load(&**store, system_prefers_dark()))
    };

    // Persist and apply theme changes
    {
        let store = store.clone();
        use_effect_with(*theme, move |t| {
            apply_theme(*t);
            if let Err(err) = t.save(&**store) {
                log::warn!("could not save theme preference: {err}");
            }
            || ()
        });
    }

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| theme.set(theme.toggled()))
    };
    let to_directory = {
        let nav = nav.dispatcher();
        Callback::from(move |_| nav.dispatch(NavAction::Return))
    };
    let open_record = {
        let nav = nav.dispatcher();
        Callback::from(move |record: DetailRecord| {
            log::debug!("opening {}", record.id());
            nav.dispatch(NavAction::Open(record));
        })
    };
    let on_category = {
        let nav = nav.dispatcher();
        Callback::from(move |c: Category| nav.dispatch(NavAction::SetCategory(c)))
    };
    let on_query = {
        let nav = nav.dispatcher();
        Callback::from(move |q: String| nav.dispatch(NavAction::SetQuery(q)))
    };
    let unlock = {
        let show = show_diagnostics.clone();
        Callback::from(move |_| show.set(true))
    };
    let close_diagnostics = {
        let show = show_diagnostics.clone();
        Callback::from(move |_| show.set(false))
    };

    let ctx = SiteContext {
        theme: *theme,
        toggle_theme,
        touch_primary,
    };

    let content = match &nav.view {
        View::Directory => html! { <Directory
            catalog={(*catalog).clone()}
            category={nav.category}
            query={AttrValue::from(nav.query.clone())}
            {on_category}
            {on_query}
            on_open={open_record}
        /> },
        View::Detail(record) => html! { <MasterDetail record={record.clone()} on_return={to_directory.clone()} /> },
    };

    html! { <ContextProvider<SiteContext> context={ctx}>
        <Header on_home={to_directory} on_unlock={unlock} />
        <div style="padding:16px;">{ content }</div>
        <Diagnostics
            show={*show_diagnostics}
            on_close={close_diagnostics}
            records={catalog.records().len()}
        />
    </ContextProvider<SiteContext>> }
}
