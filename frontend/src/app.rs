use chrono::{DateTime, Local, Utc};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::editor::RichTextEditor;
use crate::filter::View;
use crate::gateway::Gateway;
use crate::sidebar::Sidebar;
use crate::state::{Mode, Outcome, Request, State};
use crate::structs::{Note, NoteId};

const DELETE_PROMPT: &str = "Are you sure you want to delete this note?";

pub enum Msg {
    Completed(&'static str, anyhow::Result<Outcome>),

    Title(String),
    Content(String),
    Query(String),
    ChangeView(View),

    Submit,
    Cancel,
    Edit(NoteId),
    Delete(NoteId),
}

pub struct Model {
    state: State,
    gateway: Gateway,
    title_ref: NodeRef,
    focus_title: bool,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            state: State::default(),
            gateway: Gateway::default(),
            title_ref: NodeRef::default(),
            focus_title: false,
        };

        let request = model.state.refresh();
        model.dispatch(ctx, request);
        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Completed(_, Ok(outcome)) => self.state.apply(outcome),
            Msg::Completed(operation, Err(err)) => self.state.failed(operation, &err),

            Msg::Title(value) => self.state.title = value,
            // The editor already shows this content; nothing to redraw.
            Msg::Content(value) => {
                self.state.content = value;
                return false;
            }
            Msg::Query(value) => self.state.set_query(value),
            Msg::ChangeView(view) => {
                self.state.set_view(view);
                self.focus_title = view == View::New;
            }

            Msg::Submit => {
                if let Some(request) = self.state.submit() {
                    self.dispatch(ctx, request);
                }
            }
            Msg::Cancel => self.state.cancel_editing(),
            Msg::Edit(id) => {
                self.state.start_editing(&id);
                self.focus_title = true;
            }
            Msg::Delete(id) => {
                if !confirm(DELETE_PROMPT) {
                    return false;
                }
                if let Some(request) = self.state.request_delete(&id) {
                    self.dispatch(ctx, request);
                }
            }
        }

        // Render again everytime
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if std::mem::take(&mut self.focus_title) {
            if let Some(input) = self.title_ref.cast::<HtmlInputElement>() {
                if let Err(err) = input.focus() {
                    log::warn!("could not focus the title input: {:?}", err);
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="layout">
                <Sidebar active={self.state.view} on_select={ctx.link().callback(Msg::ChangeView)} />
                <main>
                    { self.view_header(ctx) }
                    if self.state.form_visible() {
                        { self.view_form(ctx) }
                    }
                    if self.state.grid_visible() {
                        { self.view_notes(ctx) }
                    }
                </main>
            </div>
        }
    }
}

impl Model {
    fn dispatch(&self, ctx: &Context<Self>, request: Request) {
        let gateway = self.gateway.clone();
        let operation = request.operation();
        ctx.link()
            .send_future(async move { Msg::Completed(operation, gateway.perform(request).await) });
    }

    fn view_header(&self, ctx: &Context<Self>) -> Html {
        let search = if self.state.search_visible() {
            html! {
                <input type="text" class="search"
                    placeholder="Search notes..."
                    value={self.state.query.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        Msg::Query(e.target_unchecked_into::<HtmlInputElement>().value())
                    })} />
            }
        } else {
            html! { <span class="badge">{ "Editing Note" }</span> }
        };

        html! {
            <header>
                <h1>
                    { self.state.heading() }
                    <span class="badge">{ self.state.view.as_str() }</span>
                </h1>
                <p>{ self.state.description() }</p>
                { search }
            </header>
        }
    }

    fn view_form(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let editing = matches!(self.state.mode(), Mode::Editing(_));

        html! {
            <form class="noteForm" onsubmit={link.callback(|e: SubmitEvent| {
                e.prevent_default();
                Msg::Submit
            })}>
                <label for="title">{ "Title" }</label>
                <input id="title" type="text" required=true
                    ref={self.title_ref.clone()}
                    placeholder="Enter note title"
                    value={self.state.title.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::Title(e.target_unchecked_into::<HtmlInputElement>().value())
                    })} />
                <label>{ "Content" }</label>
                <RichTextEditor
                    content={self.state.content.clone()}
                    on_change={link.callback(Msg::Content)}
                    placeholder="Enter note content" />
                <div class="formButtons">
                    <button type="submit" disabled={self.state.loading}>
                        { if editing { "Update Note" } else { "Create Note" } }
                    </button>
                    if editing {
                        <button type="button" onclick={link.callback(|_| Msg::Cancel)}>{ "Cancel" }</button>
                    }
                </div>
            </form>
        }
    }

    fn view_notes(&self, ctx: &Context<Self>) -> Html {
        if self.state.loading {
            return html! { <div class="loading"><p>{ "Loading notes..." }</p></div> };
        }

        let notes = self.state.visible(Utc::now());
        if notes.is_empty() {
            return html! {
                <div class="empty">
                    <h3>{ "No notes yet" }</h3>
                    <p>{ "Get started by creating your first note" }</p>
                </div>
            };
        }

        html! {
            <div class="noteGrid">
                { for notes.into_iter().map(|note| self.view_note(ctx, note)) }
            </div>
        }
    }

    fn view_note(&self, ctx: &Context<Self>, note: &Note) -> Html {
        let link = ctx.link();
        let edit_id = note.id.clone();
        let delete_id = note.id.clone();

        html! {
            <div class="note" key={note.id.clone()}>
                <div class="noteButtons">
                    <button title="Edit note" onclick={link.callback(move |_| Msg::Edit(edit_id.clone()))}>{ "Edit" }</button>
                    <button title="Delete note" onclick={link.callback(move |_| Msg::Delete(delete_id.clone()))}>{ "Delete" }</button>
                </div>
                <h2 class="noteTitle">{ note.title.clone() }</h2>
                <p class="noteContent">{ plain_text(&note.content) }</p>
                <div class="noteDates">
                    <span title="Created date">{ local_date(note.created_at) }</span>
                    <span title="Last updated">{ local_date(note.updated_at) }</span>
                </div>
            </div>
        }
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn local_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Card preview of editor HTML: tags dropped, block ends kept as line breaks.
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name = tag.trim_matches('/').split_whitespace().next().unwrap_or("");
                if (tag.starts_with('/') && matches!(name, "p" | "li" | "div")) || name == "br" {
                    text.push('\n');
                }
            }
            _ if in_tag => tag.push(c),
            _ => text.push(c),
        }
    }

    text.trim_end()
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
