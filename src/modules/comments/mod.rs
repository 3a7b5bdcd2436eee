mod handlers;
pub mod models;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookstore_kernel::{InitCtx, Module};
use serde_json::json;

use crate::SharedStore;

/// Comments nested under their book: `/books/{book_id}/comments`.
pub struct CommentsModule {
    store: SharedStore,
}

impl CommentsModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for CommentsModule {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn mount_path(&self) -> String {
        "/books/{book_id}/comments".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "comments module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/",
                get(handlers::list_comments).post(handlers::create_comment),
            )
            .route(
                "/{comment_id}",
                get(handlers::get_comment)
                    .put(handlers::update_comment)
                    .delete(handlers::delete_comment),
            )
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let id_param = |name: &str| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "schema": { "type": "integer", "format": "int64", "minimum": 0 }
            })
        };
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let comment = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Comment" }
                    }
                }
            })
        };
        let comment_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/CommentInput" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "parameters": [id_param("book_id")],
                    "get": {
                        "summary": "List a book's comments",
                        "tags": ["Comments"],
                        "parameters": [
                            {
                                "name": "pageNumber",
                                "in": "query",
                                "required": true,
                                "schema": { "type": "integer", "minimum": 1 }
                            },
                            {
                                "name": "pageSize",
                                "in": "query",
                                "required": true,
                                "schema": { "type": "integer", "minimum": 1 }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "One page of comments",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/CommentPage" }
                                    }
                                }
                            },
                            "400": error("Invalid book id, page number or page size")
                        }
                    },
                    "post": {
                        "summary": "Comment on a book",
                        "tags": ["Comments"],
                        "requestBody": comment_body.clone(),
                        "responses": {
                            "201": comment("Created comment"),
                            "400": error("Validation failed or unknown book")
                        }
                    }
                },
                "/{comment_id}": {
                    "parameters": [id_param("book_id"), id_param("comment_id")],
                    "get": {
                        "summary": "Get a comment",
                        "tags": ["Comments"],
                        "responses": {
                            "200": comment("The comment"),
                            "400": error("Invalid book or comment id"),
                            "404": error("Record not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a comment",
                        "tags": ["Comments"],
                        "requestBody": comment_body,
                        "responses": {
                            "200": comment("Updated comment"),
                            "400": error("Invalid id or validation failed"),
                            "404": error("Record not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a comment permanently",
                        "tags": ["Comments"],
                        "responses": {
                            "200": comment("Deleted comment"),
                            "400": error("Invalid book or comment id"),
                            "404": error("Record not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Comment": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "createdAt": { "type": "string", "format": "date-time" },
                            "updatedAt": { "type": "string", "format": "date-time" },
                            "deletedAt": { "type": ["string", "null"], "format": "date-time" },
                            "bookId": { "type": "integer", "format": "int64" },
                            "author": { "type": "string", "maxLength": 255 },
                            "commentText": { "type": "string", "maxLength": 255 }
                        },
                        "required": ["id", "createdAt", "updatedAt", "bookId", "author"]
                    },
                    "CommentInput": {
                        "type": "object",
                        "properties": {
                            "author": { "type": "string", "minLength": 1, "maxLength": 255 },
                            "commentText": { "type": "string", "maxLength": 255 }
                        },
                        "required": ["author"]
                    },
                    "CommentPage": {
                        "type": "object",
                        "properties": {
                            "data": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Comment" }
                            },
                            "meta": {
                                "type": "object",
                                "properties": {
                                    "pagination": { "$ref": "#/components/schemas/Pagination" }
                                }
                            }
                        },
                        "required": ["data", "meta"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "comments module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "comments module stopped");
        Ok(())
    }
}
