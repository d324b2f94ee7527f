//! Generated snippets: the logo component, the login style script and the
//! global style block.

use anyhow::{Context, Result};
use minijinja::{Environment, context};

use crate::io::config::BrandConfig;

const LOGO_COMPONENT_TEMPLATE: &str = include_str!("templates/logo_component.j2");
const LOGIN_STYLES_TEMPLATE: &str = include_str!("templates/login_styles.j2");
const GLOBAL_STYLES_TEMPLATE: &str = include_str!("templates/global_styles.j2");

/// Inputs for the `<style>` block injected into the entry HTML.
#[derive(Debug, Clone)]
pub struct GlobalStyles<'a> {
    pub style_id: &'a str,
    pub brand: &'a BrandConfig,
    pub login_logo: Option<&'a str>,
    pub header_logo: Option<&'a str>,
}

/// Template engine wrapper around minijinja.
///
/// Template names carry no extension, so nothing is auto-escaped.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("logo_component", LOGO_COMPONENT_TEMPLATE)
            .context("load logo_component template")?;
        env.add_template("login_styles", LOGIN_STYLES_TEMPLATE)
            .context("load login_styles template")?;
        env.add_template("global_styles", GLOBAL_STYLES_TEMPLATE)
            .context("load global_styles template")?;
        Ok(Self { env })
    }

    /// JSX call that renders `logo` as a centered `<img>`.
    pub fn logo_component(&self, logo: &str, alt: &str, img_class: &str) -> Result<String> {
        let template = self.env.get_template("logo_component")?;
        let rendered = template
            .render(context! { logo, alt, img_class })
            .context("render logo component")?;
        Ok(rendered)
    }

    /// Script that appends a login `<style>` element once per document.
    pub fn login_styles(&self, style_id: &str, brand: &str, logo: &str) -> Result<String> {
        let template = self.env.get_template("login_styles")?;
        let rendered = template
            .render(context! { style_id, brand, logo })
            .context("render login styles")?;
        Ok(rendered)
    }

    pub fn global_styles(&self, input: &GlobalStyles<'_>) -> Result<String> {
        let template = self.env.get_template("global_styles")?;
        let rendered = template
            .render(context! {
                style_id => input.style_id,
                slug => css_slug(&input.brand.name),
                brand => input.brand,
                login_logo => input.login_logo,
                header_logo => input.header_logo,
            })
            .context("render global styles")?;
        Ok(rendered)
    }
}

/// Marker the logo component leaves in a bundle once it has been injected.
pub fn logo_guard(alt: &str) -> String {
    format!(r#"alt:"{alt}""#)
}

/// Lowercase `name`, collapsing anything but ASCII letters and digits into `-`.
pub fn css_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("brand");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGO: &str = "data:image/png;base64,aGk=";

    #[test]
    fn logo_component_embeds_image() {
        let templates = Templates::new().expect("templates");
        let rendered = templates
            .logo_component(LOGO, "Mediabox", "h-20 w-auto")
            .expect("render");
        assert_eq!(
            rendered,
            r#"jsx14("div",{className:"flex justify-center mb-6",children:jsx14("img",{src:"data:image/png;base64,aGk=",alt:"Mediabox",className:"h-20 w-auto"})})"#
        );
        assert!(rendered.contains(&logo_guard("Mediabox")));
    }

    #[test]
    fn login_styles_are_guarded_by_id() {
        let templates = Templates::new().expect("templates");
        let rendered = templates
            .login_styles("mediabox-login-styles", "Mediabox", LOGO)
            .expect("render");
        assert!(rendered.contains("document.getElementById('mediabox-login-styles')"));
        assert!(rendered.contains("style.id = 'mediabox-login-styles';"));
        assert!(rendered.contains(&format!("url('{LOGO}')")));
    }

    #[test]
    fn global_styles_define_brand_and_keep_status_green() {
        let templates = Templates::new().expect("templates");
        let brand = BrandConfig::default();
        let rendered = templates
            .global_styles(&GlobalStyles {
                style_id: "mediabox-global-styles",
                brand: &brand,
                login_logo: Some(LOGO),
                header_logo: Some(LOGO),
            })
            .expect("render");
        assert!(rendered.trim_start().starts_with(r#"<style id="mediabox-global-styles">"#));
        assert!(rendered.trim_end().ends_with("</style>"));
        assert!(rendered.contains("--mediabox-primary: #df3d58;"));
        assert!(rendered.contains("--mediabox-hover: #c23450;"));
        assert!(rendered.contains("background-color: #10b981 !important;"));
        assert!(rendered.contains(r".focus\:shadow-borders-interactive-with-focus:focus"));
        assert_eq!(rendered.matches(LOGO).count(), 2);
    }

    #[test]
    fn global_styles_omit_missing_logos() {
        let templates = Templates::new().expect("templates");
        let brand = BrandConfig::default();
        let rendered = templates
            .global_styles(&GlobalStyles {
                style_id: "mediabox-global-styles",
                brand: &brand,
                login_logo: None,
                header_logo: Some(LOGO),
            })
            .expect("render");
        assert!(!rendered.contains("Login page logo"));
        assert!(rendered.contains("Header logo replacement"));
        assert!(!rendered.contains("url('')"));
    }

    #[test]
    fn slug_normalizes_brand_names() {
        assert_eq!(css_slug("Mediabox"), "mediabox");
        assert_eq!(css_slug("Acme Store!"), "acme-store");
        assert_eq!(css_slug("  "), "brand");
    }
}
