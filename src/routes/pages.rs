//! Fixed dashboard pages.

use askama::Template;
use askama_web::WebTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "pages/diagram.html")]
pub struct DiagramTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "pages/requests.html")]
pub struct RequestsTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "pages/concourse.html")]
pub struct ConcourseTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "pages/buttons.html")]
pub struct ButtonsTemplate;

pub async fn diagram() -> DiagramTemplate {
    DiagramTemplate
}

pub async fn requests() -> RequestsTemplate {
    RequestsTemplate
}

pub async fn concourse() -> ConcourseTemplate {
    ConcourseTemplate
}

pub async fn buttons() -> ButtonsTemplate {
    ButtonsTemplate
}
