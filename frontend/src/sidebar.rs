use yew::prelude::*;

use crate::filter::View;

const MENU: [(View, &str); 2] = [(View::All, "All Notes"), (View::Recent, "Recent")];

#[derive(Properties, PartialEq)]
pub struct Props {
    pub active: View,
    pub on_select: Callback<View>,
}

pub enum Msg {
    Toggle,
    Select(View),
}

pub struct Sidebar {
    open: bool,
}

impl Component for Sidebar {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { open: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Toggle => self.open = !self.open,
            Msg::Select(view) => {
                ctx.props().on_select.emit(view);
                // Close the mobile menu
                self.open = false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let active = ctx.props().active;

        let items = MENU.iter().map(|&(view, label)| {
            let class = classes!("menuItem", (active == view).then_some("active"));
            html! {
                <li key={view.as_str()}>
                    <button {class} onclick={link.callback(move |_| Msg::Select(view))}>{ label }</button>
                </li>
            }
        });

        html! {
            <>
                <button class="menuToggle" onclick={link.callback(|_| Msg::Toggle)}>
                    { if self.open { "Close" } else { "Menu" } }
                </button>
                <aside class={classes!("sidebar", (!self.open).then_some("closed"))}>
                    <h1>{ "NotesApp" }</h1>
                    <button
                        class={classes!("newNote", (active == View::New).then_some("active"))}
                        onclick={link.callback(|_| Msg::Select(View::New))}>
                        { "New Note" }
                    </button>
                    <nav>
                        <ul>{ for items }</ul>
                    </nav>
                </aside>
            </>
        }
    }
}
