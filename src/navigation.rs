//! The navigation bar shown at the top of every page.

use maud::{Markup, html};

use crate::endpoints;

/// A link in the navigation bar.
///
/// Only one link should be set as current at any one time.
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-teal-700 rounded-sm lg:bg-transparent
            lg:text-teal-700 lg:p-0 dark:text-white lg:dark:text-teal-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
            lg:hover:bg-transparent lg:border-0 lg:hover:text-teal-700 lg:p-0
            dark:text-white lg:dark:hover:text-teal-500 dark:hover:bg-gray-700"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// A link is marked as current if `active_endpoint` is its URL or a
    /// page underneath it, e.g. '/income/new' marks 'Income' as current.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let is_current =
            |url: &str| active_endpoint == url || active_endpoint.starts_with(&format!("{url}/"));

        let links = vec![
            Link {
                url: endpoints::INCOME_VIEW,
                title: "Income",
                is_current: is_current(endpoints::INCOME_VIEW),
            },
            Link {
                url: endpoints::RECURRING_VIEW,
                title: "Recurring",
                is_current: is_current(endpoints::RECURRING_VIEW),
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href="/"
                        class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Piton"
                    }

                    ul class="font-medium flex flex-row gap-6"
                    {
                        @for link in self.links {
                            li { (link.into_html()) }
                        }
                    }
                }
            }
        )
    }
}
