//! Rich-text content widget.
//!
//! A `contenteditable` element whose HTML is reported through `on_change`.
//! The element's children are not managed by the virtual DOM, so a new
//! `content` prop (a cleared form, a note loaded for editing) is written into
//! the element only when it differs from what the user already sees.

use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub content: String,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("Enter your content here..."))]
    pub placeholder: AttrValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    BulletList,
}

impl Format {
    fn command(self) -> &'static str {
        match self {
            Format::Bold => "bold",
            Format::Italic => "italic",
            Format::BulletList => "insertUnorderedList",
        }
    }
}

pub enum Msg {
    Input,
    Format(Format),
}

pub struct RichTextEditor {
    node: NodeRef,
}

impl Component for RichTextEditor {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { node: NodeRef::default() }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        if let Msg::Format(format) = msg {
            self.apply_format(format);
        }
        if let Some(element) = self.node.cast::<HtmlElement>() {
            ctx.props().on_change.emit(element.inner_html());
        }
        false
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        self.sync(&ctx.props().content);
        old_props.placeholder != ctx.props().placeholder
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.sync(&ctx.props().content);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="richTextEditor">
                <div class="menuBar">
                    <button type="button" title="Bold" onclick={link.callback(|_| Msg::Format(Format::Bold))}>
                        <b>{ "B" }</b>
                    </button>
                    <button type="button" title="Italic" onclick={link.callback(|_| Msg::Format(Format::Italic))}>
                        <i>{ "I" }</i>
                    </button>
                    <button type="button" title="Bullet List" onclick={link.callback(|_| Msg::Format(Format::BulletList))}>
                        { "•" }
                    </button>
                </div>
                <div class="content"
                    ref={self.node.clone()}
                    contenteditable="true"
                    data-placeholder={ctx.props().placeholder.clone()}
                    oninput={link.callback(|_: InputEvent| Msg::Input)}>
                </div>
            </div>
        }
    }
}

impl RichTextEditor {
    fn sync(&self, content: &str) {
        if let Some(element) = self.node.cast::<HtmlElement>() {
            if element.inner_html() != content {
                element.set_inner_html(content);
            }
        }
    }

    fn apply_format(&self, format: Format) {
        if let Some(element) = self.node.cast::<HtmlElement>() {
            if let Err(err) = element.focus() {
                log::warn!("could not focus the editor: {:?}", err);
            }
        }

        let document = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.dyn_into::<HtmlDocument>().ok());
        match document.map(|document| document.exec_command(format.command())) {
            Some(Ok(_)) => {}
            Some(Err(err)) => log::warn!("{} command failed: {:?}", format.command(), err),
            None => log::warn!("no document to format"),
        }
    }
}
