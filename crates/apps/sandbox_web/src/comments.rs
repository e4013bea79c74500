use serde::Deserialize;

/// One comment from the public issue-tracker comments endpoint. Only
/// the fields the page renders.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub body: String,
    #[serde(default)]
    pub user: Option<CommentAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentAuthor {
    pub login: String,
}

pub fn parse_comments(json: &str) -> Result<Vec<IssueComment>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use gloo_net::http::Request;
    use wasm_bindgen::prelude::*;

    use super::IssueComment;

    pub async fn fetch_comments(url: &str) -> Result<Vec<IssueComment>, JsValue> {
        let resp = Request::get(url)
            .send()
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let text = resp
            .text()
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        super::parse_comments(&text).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Renders fetched comments as child nodes of the container.
    pub fn render_comments(
        container_id: &str,
        comments: &[IssueComment],
    ) -> Result<(), JsValue> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(());
        };
        let Some(container) = document.get_element_by_id(container_id) else {
            return Ok(());
        };

        container.set_inner_html("");
        for comment in comments {
            let node = document.create_element("div")?;
            node.set_class_name("comment");
            if let Some(author) = &comment.user {
                let header = document.create_element("div")?;
                header.set_class_name("comment-author");
                header.set_text_content(Some(&author.login));
                node.append_child(&header)?;
            }
            let body = document.create_element("div")?;
            body.set_class_name("comment-body");
            body.set_text_content(Some(&comment.body));
            node.append_child(&body)?;
            container.append_child(&node)?;
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use wasm_bindgen::prelude::JsValue;

    use super::IssueComment;

    pub async fn fetch_comments(_url: &str) -> Result<Vec<IssueComment>, JsValue> {
        Ok(Vec::new())
    }

    pub fn render_comments(
        _container_id: &str,
        _comments: &[IssueComment],
    ) -> Result<(), JsValue> {
        Ok(())
    }
}

pub use imp::{fetch_comments, render_comments};

#[cfg(test)]
mod tests {
    use super::parse_comments;

    #[test]
    fn parses_the_comment_payload() {
        let json = r#"[
            {"body": "Nice demo", "user": {"login": "ada"}},
            {"body": "anonymous drive-by"}
        ]"#;
        let comments = parse_comments(json).expect("parse");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].user.as_ref().unwrap().login, "ada");
        assert!(comments[1].user.is_none());
    }

    #[test]
    fn rejects_non_array_payloads() {
        assert!(parse_comments("{\"message\": \"rate limited\"}").is_err());
    }
}
