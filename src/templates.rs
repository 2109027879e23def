// ABOUTME: Minimal file templates written into the deploy payload.
// ABOUTME: Entry-point module for function deploys, build descriptor for containers.

use crate::manifest::NODE_MAJOR;

/// The serverless entry point. Serves the backed-up entry document through
/// the generated server bundle, deferring to generated content otherwise.
pub fn entry_point(server_out: &str, function_id: &str) -> String {
    format!(
        r#"const functions = require('firebase-functions');
const expressApp = require('./{server_out}/main').app();

exports.{function_id} = functions.https.onRequest(expressApp);
"#
    )
}

/// Container build descriptor for managed-container deploys.
pub fn dockerfile() -> String {
    format!(
        r#"FROM node:{NODE_MAJOR}-slim
WORKDIR /usr/src/app
COPY package.json ./
RUN npm install --omit=dev
COPY . .
CMD [ "node", "." ]
"#
    )
}
