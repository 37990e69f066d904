//! Shared page layout, styles, and form building blocks for the maud templates.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::alert::ALERT_CONTAINER_ID;

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "w-full py-2.5 px-5 mb-2 \
    text-sm font-medium text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 focus:z-10 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700";

pub const BUTTON_OUTLINE_STYLE: &str = "inline-flex items-center justify-center \
    px-3 py-2 text-sm font-medium rounded border border-gray-300 \
    dark:border-gray-600 text-gray-900 dark:text-white bg-white dark:bg-gray-800 \
    hover:bg-gray-100 dark:hover:bg-gray-700";

pub const BUTTON_DANGER_STYLE: &str = "w-full px-4 py-2 bg-red-600 \
    disabled:bg-red-800 hover:enabled:bg-red-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_DESCRIPTION_STYLE: &str = "mt-1 text-xs text-gray-500 dark:text-gray-400";
pub const FORM_ERROR_STYLE: &str = "text-red-500 text-base";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Category badge style
pub const CATEGORY_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-blue-800 bg-blue-100 rounded-full \
    dark:bg-blue-900 dark:text-blue-300";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub const CARD_STYLE: &str = "flex flex-col gap-2 w-80 h-40 p-6 rounded-xl \
    bg-white dark:bg-gray-800 text-gray-900 dark:text-white shadow-sm \
    hover:bg-gray-100 dark:hover:bg-gray-700";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Pocketbook" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" integrity="sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" integrity="sha384-T41oglUPvXLGBVyRdZsVRxNWnOOqCynaPubjUVjxhsjFTKrFJGEMm3/0KGmNQ+Pg" {}

                style
                {
                    (PreEscaped(r#"
                    .spinner.htmx-indicator {
                        display: none;
                    }

                    .htmx-request .spinner.htmx-indicator {
                        display: inline;
                    }

                    .htmx-request.spinner.htmx-indicator {
                        display: inline;
                    }

                    dialog::backdrop {
                        background: rgb(0 0 0 / 0.5);
                    }
                    "#))
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id=(ALERT_CONTAINER_ID)
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// The centered card layout shared by the log-in and registration pages.
pub fn log_in_register(form_title: &str, description: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            a href="#" class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                img class="w-8 h-8 mr-2" src="/static/favicon-32x32.png" alt="logo";
                "Pocketbook"
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        (form_title)
                    }

                    p class="text-sm text-gray-500 dark:text-gray-400" { (description) }

                    (form)
                }
            }
        }
    }
}

/// A labelled form input with an optional description and error message.
pub struct FormInput<'a> {
    pub label: &'a str,
    pub id: &'a str,
    pub name: &'a str,
    pub type_: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub description: Option<&'a str>,
    pub error_message: Option<&'a str>,
    pub required: bool,
    pub autofocus: bool,
    pub max_length: Option<usize>,
    pub pattern: Option<&'a str>,
    /// The ID of a `<datalist>` with suggestions for the input.
    pub list: Option<&'a str>,
}

impl<'a> FormInput<'a> {
    /// A required text input with no extras.
    pub fn text(label: &'a str, id: &'a str, name: &'a str, value: &'a str) -> Self {
        Self {
            label,
            id,
            name,
            type_: "text",
            value,
            placeholder: "",
            description: None,
            error_message: None,
            required: true,
            autofocus: false,
            max_length: None,
            pattern: None,
            list: None,
        }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
            {
                label for=(self.id) class=(FORM_LABEL_STYLE)
                {
                    (self.label)
                }

                input
                    type=(self.type_)
                    name=(self.name)
                    id=(self.id)
                    placeholder=(self.placeholder)
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(self.value)
                    required[self.required]
                    autofocus[self.autofocus || self.error_message.is_some()]
                    maxlength=[self.max_length]
                    pattern=[self.pattern]
                    list=[self.list]
                    aria-invalid[self.error_message.is_some()];

                @if let Some(description) = self.description
                {
                    p class=(FORM_DESCRIPTION_STYLE) { (description) }
                }

                @if let Some(error_message) = self.error_message
                {
                    p class=(FORM_ERROR_STYLE) { (error_message) }
                }
            }
        }
    }
}

/// A submit button that shows a spinner and is disabled while the request is in flight.
///
/// The enclosing form should set `hx-indicator` to `#{indicator_id}` and
/// `hx-disabled-elt` to `#{button_id}`.
pub fn submit_button(button_id: &str, indicator_id: &str, text: &str, style: &str) -> Markup {
    html! {
        button
            type="submit" id=(button_id) tabindex="0"
            class=(style)
        {
            span class="spinner htmx-indicator" id=(indicator_id)
            {
                (loading_spinner())
            }
            (text)
        }
    }
}

/// A button that opens the `<dialog>` with the ID `dialog_id`.
pub fn dialog_trigger(dialog_id: &str, label: &str, style: &str) -> Markup {
    html! {
        button
            type="button"
            class=(style)
            aria-haspopup="dialog"
            onclick=(format!("document.getElementById('{dialog_id}').showModal()"))
        {
            (label)
        }
    }
}

/// A modal dialog with a title, a description, and a body (usually a form).
pub fn dialog(dialog_id: &str, title: &str, description: &str, body: &Markup) -> Markup {
    html! {
        dialog
            id=(dialog_id)
            class="w-full max-w-lg p-6 rounded-lg shadow bg-white dark:bg-gray-800 text-gray-900 dark:text-white"
        {
            header class="mb-4 space-y-1"
            {
                h2 class="text-lg font-semibold" { (title) }
                p class="text-sm text-gray-500 dark:text-gray-400" { (description) }
            }

            (body)

            button
                type="button"
                class=(BUTTON_SECONDARY_STYLE)
                onclick="this.closest('dialog').close()"
            {
                "Cancel"
            }
        }
    }
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline text-white w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::FormInput;

    #[test]
    fn form_input_renders_error_message_and_autofocus() {
        let markup = FormInput {
            error_message: Some("Name is required"),
            max_length: Some(255),
            ..FormInput::text("Name", "wallet-name", "name", "")
        }
        .into_html()
        .into_string();

        let html = Html::parse_fragment(&markup);
        let input = html
            .select(&Selector::parse("input#wallet-name").unwrap())
            .next()
            .expect("input missing");
        assert_eq!(input.value().attr("name"), Some("name"));
        assert_eq!(input.value().attr("maxlength"), Some("255"));
        assert!(input.value().attr("required").is_some());
        assert!(input.value().attr("autofocus").is_some());

        let error = html
            .select(&Selector::parse("p").unwrap())
            .next()
            .expect("error message missing")
            .text()
            .collect::<String>();
        assert_eq!(error, "Name is required");
    }

    #[test]
    fn form_input_without_error_has_no_message() {
        let markup = FormInput::text("Name", "wallet-name", "name", "Groceries")
            .into_html()
            .into_string();

        let html = Html::parse_fragment(&markup);
        assert!(html.select(&Selector::parse("p").unwrap()).next().is_none());
        let input = html
            .select(&Selector::parse("input").unwrap())
            .next()
            .unwrap();
        assert_eq!(input.value().attr("value"), Some("Groceries"));
        assert!(input.value().attr("autofocus").is_none());
    }
}
