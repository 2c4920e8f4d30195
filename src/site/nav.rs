use crate::site::escape_html;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Inicio,
    Calendario,
    Resumen,
    Archivos,
    Avisos,
}

pub struct NavItem {
    pub route: Route,
    pub key: &'static str,
    pub href: &'static str,
    pub label: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { route: Route::Inicio, key: "inicio", href: "index.html", label: "Inicio" },
    NavItem { route: Route::Calendario, key: "calendario", href: "calendario.html", label: "Calendario" },
    NavItem { route: Route::Resumen, key: "resumen", href: "resumen-de-clases.html", label: "Resumen de clases" },
    NavItem { route: Route::Archivos, key: "archivos", href: "archivos.html", label: "Archivos" },
    NavItem { route: Route::Avisos, key: "avisos", href: "avisos.html", label: "Avisos" },
];

const SITE_TITLE: &str = "Francés EOI 2025";
const FOOTER_TEXT: &str = "Hecho con cariño para la clase de francés A1 · 2025";

impl Route {
    /// Unknown or missing keys fall back to the home page.
    pub fn from_key(key: &str) -> Route {
        NAV_ITEMS
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.route)
            .unwrap_or(Route::Inicio)
    }
}

pub fn render_header(active: Route) -> String {
    let links = NAV_ITEMS
        .iter()
        .map(|item| {
            let aria = if item.route == active { r#" aria-current="page""# } else { "" };
            format!(
                r#"<li><a href="{}"{}>{}</a></li>"#,
                item.href,
                aria,
                escape_html(item.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(
        r#"<header class="site-header">
  <div class="logo-area">
    <span class="logo">{title}</span>
    <button class="menu-toggle" aria-expanded="false" aria-controls="main-nav">
      <span class="sr-only">Abrir menú</span>
      ☰
    </button>
  </div>
  <nav id="main-nav" class="site-nav">
    <ul>
            {links}
    </ul>
  </nav>
</header>"#,
        title = escape_html(SITE_TITLE),
        links = links
    )
}

pub fn render_footer() -> String {
    format!(
        r#"<footer class="site-footer">
  <p>{}</p>
</footer>"#,
        escape_html(FOOTER_TEXT)
    )
}

/// State of the collapsible menu on small screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the menu; returns the new `aria-expanded` value.
    pub fn toggle(&mut self) -> &'static str {
        self.open = !self.open;
        self.aria_expanded()
    }

    /// Following a link always closes the menu.
    pub fn follow_link(&mut self) -> &'static str {
        self.open = false;
        self.aria_expanded()
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
